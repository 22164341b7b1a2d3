//! News post handlers.
//!
//! ```text
//! GET    /api/v1/news
//! GET    /api/v1/news/{id}
//! POST   /api/v1/news        (admin)
//! PUT    /api/v1/news/{id}   (admin)
//! DELETE /api/v1/news/{id}   (admin)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ports::NewsWriteRequest;
use crate::domain::{Error, NewsPost, NewsPostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// List news posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/news",
    responses(
        (status = 200, description = "News posts", body = [NewsPost])
    ),
    tags = ["news"],
    operation_id = "listNews",
    security([])
)]
#[get("/news")]
pub async fn list_news(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NewsPost>>> {
    Ok(web::Json(state.news.list().await?))
}

/// Fetch a single news post.
#[utoipa::path(
    get,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News post id")),
    responses(
        (status = 200, description = "News post", body = NewsPost),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["news"],
    operation_id = "getNews",
    security([])
)]
#[get("/news/{id}")]
pub async fn get_news(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NewsPost>> {
    let id = NewsPostId(path.into_inner());
    Ok(web::Json(state.news.get(id).await?))
}

/// Publish a news post. Requires the administrator role.
#[utoipa::path(
    post,
    path = "/api/v1/news",
    request_body = NewsWriteRequest,
    responses(
        (status = 201, description = "News post created", body = NewsPost),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["news"],
    operation_id = "createNews"
)]
#[post("/news")]
pub async fn create_news(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewsWriteRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_admin()?;
    let post = state.news_admin.create(actor, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Replace a news post's fields. Requires the administrator role.
#[utoipa::path(
    put,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News post id")),
    request_body = NewsWriteRequest,
    responses(
        (status = 200, description = "News post updated", body = NewsPost),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["news"],
    operation_id = "updateNews"
)]
#[put("/news/{id}")]
pub async fn update_news(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<NewsWriteRequest>,
) -> ApiResult<web::Json<NewsPost>> {
    let actor = session.require_admin()?;
    let id = NewsPostId(path.into_inner());
    let post = state
        .news_admin
        .update(actor, id, payload.into_inner())
        .await?;
    Ok(web::Json(post))
}

/// Delete a news post. Requires the administrator role.
#[utoipa::path(
    delete,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News post id")),
    responses(
        (status = 204, description = "News post deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["news"],
    operation_id = "deleteNews"
)]
#[delete("/news/{id}")]
pub async fn delete_news(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_admin()?;
    let id = NewsPostId(path.into_inner());
    state.news_admin.delete(actor, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
