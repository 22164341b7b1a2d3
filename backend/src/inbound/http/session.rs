//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or clearing the signed-in
//! [`Identity`]. The admin flag is stored alongside the user id and both are
//! replaced together on every login, so a session can never pair a fresh
//! user id with a stale role.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the freshly resolved identity in the session cookie.
    ///
    /// # Errors
    /// Returns an internal error when the session store rejects the write.
    pub fn persist_identity(&self, identity: Identity) -> Result<(), Error> {
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in identity, if any.
    ///
    /// A cookie that fails to decode is treated as absent rather than as an
    /// error, so a stale or tampered session degrades to signed-out.
    pub fn identity(&self) -> Option<Identity> {
        match self.0.get::<Identity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                tracing::warn!(error = %error, "unreadable identity in session cookie");
                None
            }
        }
    }

    /// Require a signed-in identity or answer `401 Unauthorized`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when nobody is
    /// signed in.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require a signed-in administrator or answer `401`/`403`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when nobody is
    /// signed in and [`crate::domain::ErrorCode::Forbidden`] for a
    /// non-admin identity.
    pub fn require_admin(&self) -> Result<Identity, Error> {
        let identity = self.require_identity()?;
        if identity.is_admin {
            Ok(identity)
        } else {
            Err(Error::forbidden("administrator role required"))
        }
    }

    /// Remove the identity and invalidate the session cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::domain::UserId;

    fn identity(is_admin: bool) -> Identity {
        Identity {
            user_id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
            is_admin,
        }
    }

    fn session_app(
        is_admin: bool,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/login",
                web::post().to(move |session: SessionContext| async move {
                    session.persist_identity(identity(is_admin))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/me",
                web::get().to(|session: SessionContext| async move {
                    let identity = session.require_identity()?;
                    Ok::<_, Error>(HttpResponse::Ok().json(identity))
                }),
            )
            .route(
                "/admin",
                web::get().to(|session: SessionContext| async move {
                    session.require_admin()?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/logout",
                web::post().to(|session: SessionContext| async move {
                    session.clear();
                    HttpResponse::NoContent()
                }),
            )
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let response =
            test::call_service(app, test::TestRequest::post().uri("/login").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn round_trips_identity() {
        let app = test::init_service(session_app(false)).await;
        let cookie = login_cookie(&app).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorized() {
        let app = test::init_service(session_app(false)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_admin_identity_is_forbidden() {
        let app = test::init_service(session_app(false)).await;
        let cookie = login_cookie(&app).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admin_identity_passes_the_role_gate() {
        let app = test::init_service(session_app(true)).await;
        let cookie = login_cookie(&app).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn cleared_sessions_stop_authenticating() {
        let app = test::init_service(session_app(true)).await;
        let cookie = login_cookie(&app).await;

        let logout = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(logout.status(), StatusCode::NO_CONTENT);
        let cleared = logout
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie invalidated")
            .into_owned();

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/me")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
