use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::vote::VoteSummary;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct VoteDto {
    pub(crate) post_id: i64,
    pub(crate) vote_count: i64,
    /// Whether the caller's vote is now counted.
    pub(crate) voted: bool,
}

impl From<VoteSummary> for VoteDto {
    fn from(summary: VoteSummary) -> Self {
        Self {
            post_id: summary.post_id,
            vote_count: summary.vote_count,
            voted: summary.voted,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/votes",
    tag = "votes",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 201, description = "Upvote recorded", body = VoteDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Already upvoted"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn upvote(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<VoteDto>)> {
    let summary = state.vote_service.upvote(auth.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}/votes",
    tag = "votes",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Upvote withdrawn", body = VoteDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No vote to withdraw"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn withdraw_vote(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<VoteDto>)> {
    let summary = state.vote_service.withdraw_vote(auth.user_id, id).await?;
    Ok((StatusCode::OK, Json(summary.into())))
}
