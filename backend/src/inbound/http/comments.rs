//! Comment handlers.
//!
//! ```text
//! GET  /api/v1/comments/{post_type}/{post_id}
//! POST /api/v1/comments {"post":{"postType":"donation","postId":1},"content":"..."}
//! ```
//!
//! Live updates are served by the WebSocket entry in [`crate::inbound::ws`];
//! these handlers cover the initial read and authenticated writes.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::PostCommentRequest;
use crate::domain::{Comment, Error, PostRef, PostType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub(crate) fn parse_post_ref(post_type: &str, post_id: i64) -> Result<PostRef, Error> {
    let post_type: PostType = post_type
        .parse()
        .map_err(|()| Error::invalid_request("post type must be 'donation' or 'news'"))?;
    Ok(PostRef { post_type, post_id })
}

/// The full comment thread for a post, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/comments/{post_type}/{post_id}",
    params(
        ("post_type" = String, Path, description = "'donation' or 'news'"),
        ("post_id" = i64, Path, description = "Post id within that kind")
    ),
    responses(
        (status = 200, description = "Comment thread", body = [Comment]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
#[get("/comments/{post_type}/{post_id}")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<(String, i64)>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let (post_type, post_id) = path.into_inner();
    let post = parse_post_ref(&post_type, post_id)?;
    Ok(web::Json(state.comments.list_for(post).await?))
}

/// Post a comment to a thread.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = PostCommentRequest,
    responses(
        (status = 201, description = "Comment posted", body = Comment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["comments"],
    operation_id = "postComment"
)]
#[post("/comments")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PostCommentRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_identity()?;
    let comment = state.comment_posts.post(actor, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(comment))
}
