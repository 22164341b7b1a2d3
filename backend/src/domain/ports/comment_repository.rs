//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::comment::{Comment, PostRef};
use crate::domain::user::UserId;

/// Errors raised by comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentRepositoryError {
    /// The backing store could not be reached.
    #[error("comment store connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("comment store query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// Input for appending a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    /// Post the comment is attached to.
    pub post: PostRef,
    /// Authoring user.
    pub author: UserId,
    /// Author's display name at posting time.
    pub author_name: String,
    /// Validated comment body.
    pub content: String,
}

/// Port for storing and listing comments.
///
/// `list_for` returns the complete thread newest-first by `created_at`;
/// adapters must break exact-timestamp ties by insertion order, newest first,
/// so repeated reads of an unchanged thread return identical sequences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Append a comment and return it with its assigned id.
    async fn append(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// The full ordered thread for a post, newest first.
    async fn list_for(&self, post: PostRef) -> Result<Vec<Comment>, CommentRepositoryError>;
}

/// Fixture implementation holding no comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn append(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        Ok(Comment {
            id: crate::domain::comment::CommentId(0),
            post: comment.post,
            author: comment.author,
            author_name: comment.author_name.clone(),
            content: comment.content.clone(),
            created_at: chrono::Utc::now(),
        })
    }

    async fn list_for(&self, _post: PostRef) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(Vec::new())
    }
}
