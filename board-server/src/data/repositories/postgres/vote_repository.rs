use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION};
use crate::data::vote_repository::VoteRepository;
use crate::domain::error::DomainError;
use crate::domain::vote::Vote;

#[derive(Debug, Clone)]
pub(crate) struct PostgresVoteRepository {
    pool: PgPool,
}

impl PostgresVoteRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct VoteRow {
    user_id: i64,
    post_id: i64,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn create_vote(&self, user_id: i64, post_id: i64) -> Result<Vote, DomainError> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (user_id, post_id)
            VALUES ($1, $2)
            RETURNING user_id, post_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_vote_db_error)?;

        Ok(Vote {
            user_id: row.user_id,
            post_id: row.post_id,
            created_at: row.created_at,
        })
    }

    async fn delete_vote(&self, user_id: i64, post_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM votes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await
        .map_err(map_vote_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_for_post(&self, post_id: i64) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM votes
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_vote_db_error)?;

        Ok(count)
    }
}

fn map_vote_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return DomainError::AlreadyExists(
                    "vote: can only upvote a post once".to_string(),
                );
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                let resource = match db_err.constraint() {
                    Some("votes_user_id_fkey") => "user",
                    _ => "post",
                };
                return DomainError::NotFound(resource.to_string());
            }
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}
