use tracing::debug;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::{Comment, CreateCommentRequest};
use crate::domain::error::DomainError;

pub(crate) struct CommentService<C: CommentRepository> {
    repo: C,
}

impl<C: CommentRepository> CommentService<C> {
    pub(crate) fn new(repo: C) -> Self {
        Self { repo }
    }

    pub(crate) async fn add_comment(
        &self,
        user_id: i64,
        post_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        let comment = self
            .repo
            .create_comment(NewComment {
                post_id,
                user_id,
                content: req.content,
            })
            .await?;
        debug!(comment_id = comment.id, post_id, user_id, "comment posted");
        Ok(comment)
    }

    /// Comments of a post, newest first.
    pub(crate) async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        self.repo.list_for_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::CommentService;
    use crate::data::comment_repository::{CommentRepository, NewComment};
    use crate::domain::comment::{Comment, CreateCommentRequest};
    use crate::domain::error::DomainError;

    #[derive(Clone, Default)]
    struct FakeCommentRepo {
        created_input: Arc<Mutex<Option<NewComment>>>,
        listed: Arc<Mutex<Vec<Comment>>>,
        missing_post: bool,
    }

    #[async_trait]
    impl CommentRepository for FakeCommentRepo {
        async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
            if self.missing_post {
                return Err(DomainError::NotFound("post".to_string()));
            }
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Comment::new(3, input.post_id, input.user_id, input.content, Utc::now())
        }

        async fn list_for_post(&self, _post_id: i64) -> Result<Vec<Comment>, DomainError> {
            Ok(self.listed.lock().expect("listed mutex poisoned").clone())
        }
    }

    #[tokio::test]
    async fn add_comment_trims_before_repo_call() {
        let repo = FakeCommentRepo::default();
        let service = CommentService::new(repo.clone());

        let comment = service
            .add_comment(
                4,
                9,
                CreateCommentRequest {
                    content: "  Great read!  ".to_string(),
                },
            )
            .await
            .expect("comment must be created");

        assert_eq!(comment.content, "Great read!");
        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.post_id, 9);
        assert_eq!(input.user_id, 4);
        assert_eq!(input.content, "Great read!");
    }

    #[tokio::test]
    async fn add_comment_rejects_too_short_content() {
        let repo = FakeCommentRepo::default();
        let service = CommentService::new(repo.clone());

        let err = service
            .add_comment(
                4,
                9,
                CreateCommentRequest {
                    content: " ".to_string(),
                },
            )
            .await
            .expect_err("must be rejected");

        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn add_comment_on_missing_post_is_not_found() {
        let repo = FakeCommentRepo {
            missing_post: true,
            ..FakeCommentRepo::default()
        };
        let service = CommentService::new(repo);

        let err = service
            .add_comment(
                4,
                404,
                CreateCommentRequest {
                    content: "hello there".to_string(),
                },
            )
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_comments_passes_repo_order_through() {
        let repo = FakeCommentRepo::default();
        let newer = Comment::new(2, 9, 1, "second", Utc::now()).expect("valid comment");
        let older = Comment::new(1, 9, 1, "first", Utc::now()).expect("valid comment");
        *repo.listed.lock().expect("listed mutex poisoned") = vec![newer, older];

        let comments = CommentService::new(repo)
            .list_comments(9)
            .await
            .expect("listing must succeed");
        let ids: Vec<i64> = comments.iter().map(|comment| comment.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
