//! Port for realtime comment event fan-out.
//!
//! Subscriptions are keyed on the full `(post_type, post_id)` pair. A
//! subscription stops delivering the moment it is cancelled or dropped;
//! implementations must not buffer events past that point.

use async_trait::async_trait;

use crate::domain::comment::{CommentPosted, PostRef};

/// Errors raised by comment channel adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentChannelError {
    /// The channel is shut down or otherwise unusable.
    #[error("comment channel unavailable: {message}")]
    Unavailable {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// A live subscription to one post's comment events.
#[async_trait]
pub trait CommentSubscription: Send {
    /// Wait for the next event on this post.
    ///
    /// Returns `None` once the subscription is cancelled or the channel is
    /// shut down. Implementations may skip events a slow consumer missed;
    /// consumers recover by re-reading the full thread.
    async fn next_event(&mut self) -> Option<CommentPosted>;

    /// Stop delivery. After this returns, `next_event` yields `None` and no
    /// event published later is observed. Dropping the subscription has the
    /// same effect.
    fn cancel(&mut self);
}

/// Port for publishing and subscribing to comment events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentChannel: Send + Sync {
    /// Publish an event to subscribers of its post.
    async fn publish(&self, event: CommentPosted) -> Result<(), CommentChannelError>;

    /// Subscribe to events for one post.
    async fn subscribe(
        &self,
        post: PostRef,
    ) -> Result<Box<dyn CommentSubscription>, CommentChannelError>;
}

/// Fixture implementation that drops published events and yields
/// subscriptions that never deliver.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentChannel;

struct FixtureSubscription;

#[async_trait]
impl CommentSubscription for FixtureSubscription {
    async fn next_event(&mut self) -> Option<CommentPosted> {
        None
    }

    fn cancel(&mut self) {}
}

#[async_trait]
impl CommentChannel for FixtureCommentChannel {
    async fn publish(&self, _event: CommentPosted) -> Result<(), CommentChannelError> {
        Ok(())
    }

    async fn subscribe(
        &self,
        _post: PostRef,
    ) -> Result<Box<dyn CommentSubscription>, CommentChannelError> {
        Ok(Box::new(FixtureSubscription))
    }
}
