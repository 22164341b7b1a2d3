//! Profile handlers.
//!
//! ```text
//! GET  /api/v1/profile
//! PUT  /api/v1/profile/display-name {"displayName":"Aye Chan"}
//! POST /api/v1/profile/avatar       (raw image body)
//! ```

use actix_web::{HttpRequest, get, http::header, post, put, web};
use serde::Deserialize;

use crate::domain::ports::AvatarUpload;
use crate::domain::{Error, Profile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Largest accepted avatar upload in bytes (2 MiB).
pub const AVATAR_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Content types accepted for avatar uploads.
const AVATAR_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Display-name update body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNameBody {
    pub display_name: String,
}

/// The caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No profile for this account", body = Error)
    ),
    tags = ["profile"],
    operation_id = "ownProfile"
)]
#[get("/profile")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Profile>> {
    let actor = session.require_identity()?;
    Ok(web::Json(state.profile.own_profile(actor).await?))
}

/// Replace the caller's display name.
#[utoipa::path(
    put,
    path = "/api/v1/profile/display-name",
    request_body = DisplayNameBody,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["profile"],
    operation_id = "updateDisplayName"
)]
#[put("/profile/display-name")]
pub async fn update_display_name(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DisplayNameBody>,
) -> ApiResult<web::Json<Profile>> {
    let actor = session.require_identity()?;
    let profile = state
        .profile_edits
        .update_display_name(actor, payload.into_inner().display_name)
        .await?;
    Ok(web::Json(profile))
}

fn avatar_content_type(req: &HttpRequest) -> Result<String, Error> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if AVATAR_CONTENT_TYPES.contains(&content_type) {
        Ok(content_type.to_owned())
    } else {
        Err(Error::invalid_request(format!(
            "avatar content type must be one of: {}",
            AVATAR_CONTENT_TYPES.join(", ")
        )))
    }
}

/// Upload a new avatar image.
///
/// The raw image is the request body; its MIME type comes from the
/// `Content-Type` header.
#[utoipa::path(
    post,
    path = "/api/v1/profile/avatar",
    request_body(content = Vec<u8>, content_type = "image/png"),
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["profile"],
    operation_id = "uploadAvatar"
)]
#[post("/profile/avatar")]
pub async fn upload_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<Profile>> {
    let actor = session.require_identity()?;
    let content_type = avatar_content_type(&req)?;
    if body.is_empty() {
        return Err(Error::invalid_request("avatar image must not be empty"));
    }
    if body.len() > AVATAR_MAX_BYTES {
        return Err(Error::invalid_request(format!(
            "avatar image must be at most {AVATAR_MAX_BYTES} bytes"
        )));
    }
    let upload = AvatarUpload {
        content_type,
        bytes: body.to_vec(),
    };
    let profile = state.profile_edits.upload_avatar(actor, upload).await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};

    use crate::domain::{Identity, UserId};
    use crate::inbound::http::test_utils::test_session_middleware;

    fn app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::default()))
            .wrap(test_session_middleware())
            .route(
                "/test-login",
                web::post().to(|session: SessionContext| async move {
                    session.persist_identity(Identity {
                        user_id: UserId::random(),
                        is_admin: false,
                    })?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .service(own_profile)
            .service(upload_avatar)
    }

    async fn session_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let response =
            test::call_service(app, test::TestRequest::post().uri("/test-login").to_request())
                .await;
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn anonymous_profile_reads_are_unauthorized() {
        let app = test::init_service(app()).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/profile").to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unsupported_avatar_types_are_rejected() {
        let app = test::init_service(app()).await;
        let cookie = session_cookie(&app).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/profile/avatar")
                .cookie(cookie)
                .insert_header((header::CONTENT_TYPE, "application/pdf"))
                .set_payload(vec![1, 2, 3])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn empty_avatar_bodies_are_rejected() {
        let app = test::init_service(app()).await;
        let cookie = session_cookie(&app).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/profile/avatar")
                .cookie(cookie)
                .insert_header((header::CONTENT_TYPE, "image/png"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
