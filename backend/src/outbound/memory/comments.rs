//! In-memory comment repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::comment::{Comment, CommentId, PostRef};
use crate::domain::ports::{CommentRepository, CommentRepositoryError, NewComment};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    comments: Vec<Comment>,
}

/// In-memory [`CommentRepository`] implementation.
///
/// Comment ids are assigned in insertion order, which is what `list_for`
/// uses to break exact-timestamp ties.
#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    state: RwLock<State>,
}

impl MemoryCommentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn append(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let stored = Comment {
            id: CommentId(state.next_id),
            post: comment.post,
            author: comment.author,
            author_name: comment.author_name.clone(),
            content: comment.content.clone(),
            created_at: Utc::now(),
        };
        state.comments.push(stored.clone());
        Ok(stored)
    }

    async fn list_for(&self, post: PostRef) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.state.read().await;
        let mut thread: Vec<Comment> = state
            .comments
            .iter()
            .filter(|comment| comment.post == post)
            .cloned()
            .collect();
        thread.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(thread)
    }
}
