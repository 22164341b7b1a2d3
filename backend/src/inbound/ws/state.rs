//! Shared WebSocket adapter state.

use std::sync::Arc;

use crate::domain::ports::CommentQuery;

/// Dependency bundle for WebSocket connections.
#[derive(Clone)]
pub struct WsState {
    /// Read side of the comment domain: thread reads and subscriptions.
    pub comments: Arc<dyn CommentQuery>,
}

impl WsState {
    /// Bundle the comment query port for connection handlers.
    #[must_use]
    pub fn new(comments: Arc<dyn CommentQuery>) -> Self {
        Self { comments }
    }
}
