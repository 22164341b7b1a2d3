//! WebSocket inbound adapter streaming comment threads to viewers.
//!
//! Responsibilities:
//! - validate the watched post reference before upgrading
//! - initialise the per-connection stream task
//! - keep WebSocket-specific concerns at the edge of the system
//!
//! Each delivered event triggers a re-read of the full thread, so clients
//! always render a complete snapshot rather than patching local state.

use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get};
use tracing::error;

use crate::inbound::http::comments::parse_post_ref;

mod session;

pub mod messages;
pub mod state;

/// Handle WebSocket upgrades for `/ws/comments/{post_type}/{post_id}`.
#[get("/ws/comments/{post_type}/{post_id}")]
pub async fn comment_stream(
    state: web::Data<state::WsState>,
    req: HttpRequest,
    stream: Payload,
    path: web::Path<(String, i64)>,
) -> actix_web::Result<HttpResponse> {
    let (post_type, post_id) = path.into_inner();
    let post = parse_post_ref(&post_type, post_id)?;

    let (response, session, message_stream) = actix_ws::handle(&req, stream).map_err(|err| {
        error!(error = %err, "WebSocket upgrade failed");
        err
    })?;

    let comments = state.comments.clone();
    actix_web::rt::spawn(session::handle_ws_session(
        comments,
        post,
        session,
        message_stream,
    ));

    Ok(response)
}
