//! In-process comment event hub.
//!
//! One tokio broadcast channel per `(post_type, post_id)` pair. The server
//! is the realtime channel for its own clients, so no external message bus
//! is involved. Channels are created on first use and removed once the last
//! subscriber is gone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::comment::{CommentPosted, PostRef};
use crate::domain::ports::{CommentChannel, CommentChannelError, CommentSubscription};

/// Buffered events per post before slow subscribers start missing them.
/// Missed events are harmless; subscribers re-read the full thread on every
/// delivery anyway.
const CHANNEL_CAPACITY: usize = 64;

/// Broadcast-based [`CommentChannel`] implementation.
#[derive(Clone, Default)]
pub struct BroadcastCommentHub {
    senders: Arc<Mutex<HashMap<PostRef, broadcast::Sender<CommentPosted>>>>,
}

impl BroadcastCommentHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_senders(
        &self,
    ) -> Result<
        std::sync::MutexGuard<'_, HashMap<PostRef, broadcast::Sender<CommentPosted>>>,
        CommentChannelError,
    > {
        self.senders
            .lock()
            .map_err(|_| CommentChannelError::Unavailable {
                message: "comment hub lock poisoned".to_owned(),
            })
    }

    /// Number of live subscribers for a post. Used by tests and diagnostics.
    #[must_use]
    pub fn subscriber_count(&self, post: PostRef) -> usize {
        self.senders
            .lock()
            .ok()
            .and_then(|senders| senders.get(&post).map(broadcast::Sender::receiver_count))
            .unwrap_or(0)
    }
}

#[async_trait]
impl CommentChannel for BroadcastCommentHub {
    async fn publish(&self, event: CommentPosted) -> Result<(), CommentChannelError> {
        let mut senders = self.lock_senders()?;
        if let Some(sender) = senders.get(&event.post) {
            if sender.send(event).is_err() {
                // Last subscriber left between publishes.
                senders.remove(&event.post);
                debug!(post = %event.post, "dropped idle comment channel");
            }
        }
        Ok(())
    }

    async fn subscribe(
        &self,
        post: PostRef,
    ) -> Result<Box<dyn CommentSubscription>, CommentChannelError> {
        let receiver = {
            let mut senders = self.lock_senders()?;
            senders
                .entry(post)
                .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
                .subscribe()
        };
        Ok(Box::new(BroadcastSubscription {
            receiver: Some(receiver),
        }))
    }
}

/// Subscription backed by a broadcast receiver.
///
/// Cancelling drops the receiver, so no event published afterwards can be
/// observed. Dropping the subscription has the same effect.
struct BroadcastSubscription {
    receiver: Option<broadcast::Receiver<CommentPosted>>,
}

#[async_trait]
impl CommentSubscription for BroadcastSubscription {
    async fn next_event(&mut self) -> Option<CommentPosted> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    // Skipped events carry no payload the consumer needs; the
                    // next delivery still triggers a full re-read.
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    fn cancel(&mut self) {
        self.receiver = None;
    }
}
