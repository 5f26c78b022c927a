use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::vote::Vote;

#[async_trait]
pub(crate) trait VoteRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the user already voted on the post.
    async fn create_vote(&self, user_id: i64, post_id: i64) -> Result<Vote, DomainError>;
    async fn delete_vote(&self, user_id: i64, post_id: i64) -> Result<bool, DomainError>;
    async fn count_for_post(&self, post_id: i64) -> Result<i64, DomainError>;
}
