use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::ranking::{RankCandidate, RankingError};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl Pagination {
    pub(crate) fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub(crate) fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * self.limit()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PostWithVotes {
    pub(crate) post: Post,
    pub(crate) vote_count: i64,
}

/// Raw per-post aggregate as read from storage, before it is trusted for ranking.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RankingRecord {
    pub(crate) id: i64,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) vote_count: Option<i64>,
}

impl TryFrom<RankingRecord> for RankCandidate {
    type Error = RankingError;

    fn try_from(record: RankingRecord) -> Result<Self, Self::Error> {
        let created_at = record
            .created_at
            .ok_or(RankingError::MissingCreatedAt { post_id: record.id })?;
        let vote_count = record
            .vote_count
            .ok_or(RankingError::MissingVoteCount { post_id: record.id })?;
        if vote_count < 0 {
            return Err(RankingError::NegativeVoteCount {
                post_id: record.id,
                vote_count,
            });
        }

        Ok(Self {
            id: record.id,
            created_at,
            vote_count,
        })
    }
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<PostWithVotes>, DomainError>;
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    /// Newest first.
    async fn list_recent(&self, pagination: Pagination) -> Result<Vec<PostWithVotes>, DomainError>;
    /// One aggregate row per post: id, creation time and vote count.
    async fn list_ranking_records(&self) -> Result<Vec<RankingRecord>, DomainError>;
    /// Rows for `ids`, in no particular order. Unknown ids are skipped.
    async fn get_posts_by_ids(&self, ids: &[i64]) -> Result<Vec<Post>, DomainError>;
    async fn total_posts(&self) -> Result<i64, DomainError>;
}
