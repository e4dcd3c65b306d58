use crate::data::comment_repository::{CommentRepository, CommentWithAuthor, NewComment};
use crate::domain::comment::CreateCommentRequest;
use crate::domain::error::DomainError;

pub(crate) struct CommentService<C: CommentRepository> {
    repo: C,
}

impl<C: CommentRepository> CommentService<C> {
    pub(crate) fn new(repo: C) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        req: CreateCommentRequest,
    ) -> Result<CommentWithAuthor, DomainError> {
        let req = req.validate()?;

        self.repo
            .create_comment(NewComment {
                post_id,
                user_id,
                content: req.content,
            })
            .await
            .map_err(|err| match err {
                DomainError::NotFound(what) if what == "post" => {
                    DomainError::NotFound("Post not found".to_string())
                }
                other => other,
            })
    }

    /// Returns the parent post id so the caller can refresh its view.
    pub(crate) async fn delete_comment(
        &self,
        comment_id: i64,
        author_id: i64,
    ) -> Result<i64, DomainError> {
        self.repo
            .delete_comment_owned(comment_id, author_id)
            .await?
            .ok_or_else(|| {
                DomainError::Forbidden(
                    "You don't have permission to delete this comment or the comment doesn't exist"
                        .to_string(),
                )
            })
    }

    pub(crate) async fn user_comment_count(&self, user_id: i64) -> Result<i64, DomainError> {
        self.repo.count_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::CommentService;
    use crate::data::comment_repository::{CommentRepository, CommentWithAuthor, NewComment};
    use crate::domain::comment::CreateCommentRequest;
    use crate::domain::error::DomainError;

    #[derive(Clone, Default)]
    struct FakeCommentRepo {
        created_input: Arc<Mutex<Option<NewComment>>>,
        delete_result: Arc<Mutex<Option<i64>>>,
        post_missing: Arc<Mutex<bool>>,
    }

    #[async_trait]
    impl CommentRepository for FakeCommentRepo {
        async fn create_comment(
            &self,
            input: NewComment,
        ) -> Result<CommentWithAuthor, DomainError> {
            if *self.post_missing.lock().expect("post_missing mutex poisoned") {
                return Err(DomainError::NotFound("post".to_string()));
            }
            let comment = CommentWithAuthor {
                id: 5,
                post_id: input.post_id,
                content: input.content.clone(),
                created_at: Utc::now(),
                user_id: input.user_id,
                user_name: "Alice".to_string(),
            };
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input);
            Ok(comment)
        }

        async fn list_for_post(
            &self,
            _post_id: i64,
        ) -> Result<Vec<CommentWithAuthor>, DomainError> {
            Ok(Vec::new())
        }

        async fn delete_comment_owned(
            &self,
            _comment_id: i64,
            _author_id: i64,
        ) -> Result<Option<i64>, DomainError> {
            Ok(*self.delete_result.lock().expect("delete_result mutex poisoned"))
        }

        async fn count_by_user(&self, _user_id: i64) -> Result<i64, DomainError> {
            Ok(2)
        }
    }

    #[tokio::test]
    async fn create_comment_trims_content() {
        let repo = FakeCommentRepo::default();
        let service = CommentService::new(repo.clone());

        let comment = service
            .create_comment(
                7,
                10,
                CreateCommentRequest {
                    content: "  nice post  ".to_string(),
                },
            )
            .await
            .expect("create must succeed");
        assert_eq!(comment.content, "nice post");

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("input must be captured");
        assert_eq!(input.post_id, 7);
        assert_eq!(input.user_id, 10);
    }

    #[tokio::test]
    async fn create_comment_maps_missing_post() {
        let repo = FakeCommentRepo::default();
        *repo.post_missing.lock().expect("post_missing mutex poisoned") = true;
        let service = CommentService::new(repo);

        let err = service
            .create_comment(
                7,
                10,
                CreateCommentRequest {
                    content: "hello".to_string(),
                },
            )
            .await
            .expect_err("create must fail");
        match err {
            DomainError::NotFound(message) => assert_eq!(message, "Post not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_comment_is_forbidden_when_not_author() {
        let service = CommentService::new(FakeCommentRepo::default());

        let err = service
            .delete_comment(5, 10)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_comment_returns_parent_post_id() {
        let repo = FakeCommentRepo::default();
        *repo.delete_result.lock().expect("delete_result mutex poisoned") = Some(7);
        let service = CommentService::new(repo);

        let post_id = service
            .delete_comment(5, 10)
            .await
            .expect("delete must succeed");
        assert_eq!(post_id, 7);
    }
}
