//! Authentication handlers.
//!
//! ```text
//! POST /api/v1/auth/login       {"email":"user@example.com","password":"secret"}
//! POST /api/v1/auth/admin-login {"email":"admin@example.com","password":"secret"}
//! POST /api/v1/auth/logout
//! ```
//!
//! Login resolves the caller's role from their profile before the session is
//! written, so the cookie always carries a freshly checked admin flag.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use zeroize::Zeroize;

use crate::domain::{Credentials, CredentialsError, Error, Identity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Drop for LoginRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

fn credentials_from(payload: &mut LoginRequest) -> Result<Credentials, Error> {
    Credentials::new(&payload.email, std::mem::take(&mut payload.password))
        .map_err(map_credentials_error)
}

fn map_credentials_error(err: CredentialsError) -> Error {
    match err {
        CredentialsError::InvalidEmail => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        CredentialsError::EmptyPassword => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = Identity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Identity>> {
    let mut payload = payload.into_inner();
    let credentials = credentials_from(&mut payload)?;
    let identity = state.auth.login(credentials).await?;
    session.persist_identity(identity)?;
    Ok(web::Json(identity))
}

/// Authenticate an administrator and establish a session.
///
/// Identical to [`login`] except that accounts without the administrator
/// role are rejected before any session is written.
#[utoipa::path(
    post,
    path = "/api/v1/auth/admin-login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = Identity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["auth"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/auth/admin-login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Identity>> {
    let mut payload = payload.into_inner();
    let credentials = credentials_from(&mut payload)?;
    let identity = state.auth.admin_login(credentials).await?;
    session.persist_identity(identity)?;
    Ok(web::Json(identity))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session ended")
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use std::sync::Arc;

    use crate::domain::UserId;
    use crate::domain::ports::MockAuthCommand;

    fn identity(is_admin: bool) -> Identity {
        Identity {
            user_id: UserId::random(),
            is_admin,
        }
    }

    fn app_with_auth(
        auth: MockAuthCommand,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState {
            auth: Arc::new(auth),
            ..HttpState::default()
        };
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(login)
            .service(admin_login)
            .service(logout)
    }

    #[actix_web::test]
    async fn successful_login_sets_a_session_cookie() {
        let mut auth = MockAuthCommand::new();
        auth.expect_login().returning(|_| Ok(identity(false)));
        let app = test::init_service(app_with_auth(auth)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": "user@example.com", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
    }

    #[actix_web::test]
    async fn malformed_email_is_rejected_before_the_port_is_called() {
        let mut auth = MockAuthCommand::new();
        auth.expect_login().never();
        let app = test::init_service(app_with_auth(auth)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": "not-an-email", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn failed_admin_login_leaves_no_session() {
        let mut auth = MockAuthCommand::new();
        auth.expect_admin_login()
            .returning(|_| Err(Error::forbidden("administrator role required")));
        let app = test::init_service(app_with_auth(auth)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/admin-login")
                .set_json(json!({ "email": "user@example.com", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(
            !response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
    }
}
