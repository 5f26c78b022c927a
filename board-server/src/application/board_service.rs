use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use super::clock::Clock;
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, RankedPost, UpdatePostRequest};
use crate::domain::ranking::{self, RankCandidate};

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<RankedPost>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

pub(crate) struct BoardService<R: PostRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: PostRepository> BoardService<R> {
    pub(crate) fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            author_id,
        };
        let post = self.repo.create_post(new_post).await?;
        debug!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<RankedPost, DomainError> {
        let found = self
            .repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        Ok(RankedPost::at(found.post, found.vote_count, self.clock.now()))
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            content: req.content,
        };
        self.repo
            .update_post_owned(post_id, actor_user_id, patch)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let original = self
            .repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        if original.post.author_id != actor_user_id {
            return Err(DomainError::Forbidden);
        }

        if !self.repo.delete_post(post_id).await? {
            return Err(DomainError::post_not_found(post_id));
        }
        debug!(post_id, "post deleted");
        Ok(())
    }

    /// Page of posts ordered by decayed popularity.
    ///
    /// Every post is scored against a single `now`; the page is cut from the
    /// full ranking, so page boundaries are consistent within one request.
    pub(crate) async fn list_ranked_posts(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ListPostsResult, DomainError> {
        let now = self.clock.now();
        let records = self.repo.list_ranking_records().await?;
        let candidates = records
            .into_iter()
            .map(RankCandidate::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| error!(error = %err, "malformed ranking record"))?;

        let ordered = ranking::rank(&candidates, now);
        let total = ordered.len() as i64;

        let pagination = Pagination { page, page_size };
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        let page_ids: Vec<i64> = ordered.into_iter().skip(skip).take(take).collect();

        let vote_counts: HashMap<i64, i64> = candidates
            .iter()
            .map(|candidate| (candidate.id, candidate.vote_count))
            .collect();
        let mut rows: HashMap<i64, Post> = self
            .repo
            .get_posts_by_ids(&page_ids)
            .await?
            .into_iter()
            .map(|post| (post.id, post))
            .collect();

        let mut posts = Vec::with_capacity(page_ids.len());
        for id in page_ids {
            let Some(post) = rows.remove(&id) else {
                warn!(post_id = id, "ranked post disappeared before fetch");
                continue;
            };
            let vote_count = vote_counts.get(&id).copied().unwrap_or_default();
            posts.push(RankedPost::at(post, vote_count, now));
        }

        Ok(ListPostsResult {
            posts,
            page,
            page_size,
            total,
        })
    }

    /// Page of posts, newest first.
    pub(crate) async fn list_recent_posts(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ListPostsResult, DomainError> {
        let now = self.clock.now();
        let pagination = Pagination { page, page_size };
        let rows = self.repo.list_recent(pagination).await?;
        let total = self.repo.total_posts().await?;

        Ok(ListPostsResult {
            posts: rows
                .into_iter()
                .map(|row| RankedPost::at(row.post, row.vote_count, now))
                .collect(),
            page,
            page_size,
            total,
        })
    }
}
