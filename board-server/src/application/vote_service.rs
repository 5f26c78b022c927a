use tracing::debug;

use crate::data::vote_repository::VoteRepository;
use crate::domain::error::DomainError;
use crate::domain::vote::VoteSummary;

pub(crate) struct VoteService<V: VoteRepository> {
    votes: V,
}

impl<V: VoteRepository> VoteService<V> {
    pub(crate) fn new(votes: V) -> Self {
        Self { votes }
    }

    /// Records the user's single upvote on a post.
    pub(crate) async fn upvote(&self, user_id: i64, post_id: i64) -> Result<VoteSummary, DomainError> {
        let vote = self.votes.create_vote(user_id, post_id).await?;
        debug!(
            user_id = vote.user_id,
            post_id = vote.post_id,
            voted_at = %vote.created_at,
            "vote recorded"
        );

        let vote_count = self.votes.count_for_post(post_id).await?;
        Ok(VoteSummary {
            post_id,
            vote_count,
            voted: true,
        })
    }

    pub(crate) async fn withdraw_vote(
        &self,
        user_id: i64,
        post_id: i64,
    ) -> Result<VoteSummary, DomainError> {
        if !self.votes.delete_vote(user_id, post_id).await? {
            return Err(DomainError::NotFound(format!("vote on post id: {post_id}")));
        }
        debug!(user_id, post_id, "vote withdrawn");

        let vote_count = self.votes.count_for_post(post_id).await?;
        Ok(VoteSummary {
            post_id,
            vote_count,
            voted: false,
        })
    }
}
