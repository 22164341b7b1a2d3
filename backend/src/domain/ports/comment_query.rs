//! Driving port for reading and watching comment threads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::comment::{Comment, PostRef};
use crate::domain::ports::comment_channel::CommentSubscription;

/// Driving port for comment read operations.
///
/// Watchers combine `subscribe` with `list_for`: each delivered event is a
/// cue to re-read the full thread, so a viewer never renders a partial
/// update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// The full ordered thread for a post, newest first.
    async fn list_for(&self, post: PostRef) -> Result<Vec<Comment>, Error>;

    /// Subscribe to comment events for a post.
    async fn subscribe(&self, post: PostRef) -> Result<Box<dyn CommentSubscription>, Error>;
}

/// Fixture query serving empty threads and silent subscriptions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentQuery;

#[async_trait]
impl CommentQuery for FixtureCommentQuery {
    async fn list_for(&self, _post: PostRef) -> Result<Vec<Comment>, Error> {
        Ok(Vec::new())
    }

    async fn subscribe(&self, post: PostRef) -> Result<Box<dyn CommentSubscription>, Error> {
        use crate::domain::ports::comment_channel::{CommentChannel, FixtureCommentChannel};
        FixtureCommentChannel
            .subscribe(post)
            .await
            .map_err(|err| Error::internal(err.to_string()))
    }
}
