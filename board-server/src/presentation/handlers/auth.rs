//! Sign-up and sign-in. Both answer with a session: a bearer token for the
//! protected post, vote and comment routes plus the member it belongs to.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SignUpDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SignInDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

/// Public profile of a member; never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MemberDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SessionDto {
    pub(crate) access_token: String,
    pub(crate) user: MemberDto,
}

impl From<SignUpDto> for RegisterRequest {
    fn from(dto: SignUpDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
        }
    }
}

impl From<SignInDto> for LoginRequest {
    fn from(dto: SignInDto) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
        }
    }
}

impl From<User> for MemberDto {
    fn from(member: User) -> Self {
        Self {
            id: member.id,
            username: member.username,
            email: member.email,
            created_at: member.created_at,
        }
    }
}

impl From<AuthResult> for SessionDto {
    fn from(session: AuthResult) -> Self {
        Self {
            access_token: session.access_token,
            user: session.user.into(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Member joined the board", body = SessionDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<SignUpDto>,
) -> AppResult<(StatusCode, Json<SessionDto>)> {
    dto.validate()?;
    let session = state.auth_service.register(dto.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = SignInDto,
    responses(
        (status = 200, description = "Session opened", body = SessionDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unknown username or wrong password"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<SignInDto>,
) -> AppResult<(StatusCode, Json<SessionDto>)> {
    dto.validate()?;
    let session = state.auth_service.login(dto.into()).await?;
    Ok((StatusCode::OK, Json(session.into())))
}
