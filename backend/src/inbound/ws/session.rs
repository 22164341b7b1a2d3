//! Per-connection WebSocket handler.
//!
//! Keeps framing and heartbeats at the edge while deferring thread reads to
//! the injected [`CommentQuery`] port. The connection sends a full thread
//! snapshot on connect and again after every comment event. The public
//! contract pings every 5s and considers a connection idle after 10s without
//! client traffic; tests shorten these intervals to speed up feedback.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::time;
use tracing::warn;

use crate::domain::comment::{CommentPosted, PostRef};
use crate::domain::ports::CommentQuery;
use crate::inbound::ws::messages::ThreadSnapshot;

/// Time between heartbeats to the client.
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client.
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(500);

pub(super) async fn handle_ws_session(
    comments: Arc<dyn CommentQuery>,
    post: PostRef,
    session: Session,
    stream: MessageStream,
) {
    WsSession::new(comments, post).run(session, stream).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    ChannelClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    SnapshotFailed,
    Network(Closed),
}

struct WsSession {
    comments: Arc<dyn CommentQuery>,
    post: PostRef,
}

impl WsSession {
    fn new(comments: Arc<dyn CommentQuery>, post: PostRef) -> Self {
        Self { comments, post }
    }

    async fn run(&self, mut session: Session, mut stream: MessageStream) {
        let mut subscription = match self.comments.subscribe(self.post).await {
            Ok(subscription) => subscription,
            Err(error) => {
                warn!(post = %self.post, error = %error, "comment subscription failed");
                let _ = session
                    .close(Some(CloseReason::from(CloseCode::Error)))
                    .await;
                return;
            }
        };

        // Initial snapshot so the viewer starts from the full thread.
        if let Err(error) = self.send_snapshot(&mut session).await {
            subscription.cancel();
            self.log_shutdown_reason(&error);
            return;
        }

        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    self.handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                event = subscription.next_event() => {
                    self.handle_comment_event(&mut session, event).await
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message)
                        .await
                }
            };

            if let Err(error) = result {
                subscription.cancel();
                self.log_shutdown_reason(&error);
                let close_reason = self.close_reason_for(&error);
                if let Some(reason) = close_reason {
                    let _ = session.close(reason).await;
                }
                return;
            }
        }
    }

    async fn handle_heartbeat_tick(
        &self,
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_comment_event(
        &self,
        session: &mut Session,
        event: Option<CommentPosted>,
    ) -> Result<(), SessionError> {
        if event.is_none() {
            return Err(SessionError::ChannelClosed);
        }
        // The event is only a cue; the snapshot is re-read in full.
        self.send_snapshot(session).await
    }

    async fn handle_stream_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(Message::Ping(payload)) => {
                *last_heartbeat = Instant::now();
                session
                    .pong(&payload)
                    .await
                    .map_err(SessionError::Network)?;
                Ok(())
            }
            Ok(Message::Close(reason)) => Err(SessionError::ClientClosed(reason)),
            Ok(_) => {
                // The stream is one-way; any client traffic just proves
                // liveness.
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn send_snapshot(&self, session: &mut Session) -> Result<(), SessionError> {
        let comments = match self.comments.list_for(self.post).await {
            Ok(comments) => comments,
            Err(error) => {
                warn!(post = %self.post, error = %error, "thread read failed");
                return Err(SessionError::SnapshotFailed);
            }
        };
        let snapshot = ThreadSnapshot {
            post: self.post,
            comments,
        };
        match serde_json::to_string(&snapshot) {
            Ok(body) => session.text(body).await.map_err(SessionError::Network),
            Err(error) => {
                warn!(error = %error, "failed to serialize thread snapshot");
                Err(SessionError::SnapshotFailed)
            }
        }
    }

    fn close_reason_for(&self, error: &SessionError) -> Option<Option<CloseReason>> {
        match error {
            SessionError::ClientClosed(reason) => Some(reason.clone()),
            SessionError::HeartbeatTimeout | SessionError::ChannelClosed => {
                Some(Some(CloseReason::from(CloseCode::Away)))
            }
            SessionError::SnapshotFailed => Some(Some(CloseReason::from(CloseCode::Error))),
            SessionError::Protocol(_) => Some(Some(CloseReason::from(CloseCode::Protocol))),
            SessionError::StreamClosed | SessionError::Network(_) => None,
        }
    }

    fn log_shutdown_reason(&self, error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!(post = %self.post, "WebSocket heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(post = %self.post, error = %error, "WebSocket protocol error");
            }
            SessionError::Network(error) => {
                warn!(post = %self.post, error = %error, "WebSocket send failed; closing connection");
            }
            SessionError::SnapshotFailed
            | SessionError::ChannelClosed
            | SessionError::ClientClosed(_)
            | SessionError::StreamClosed => {}
        }
    }
}
