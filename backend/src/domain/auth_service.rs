//! Authentication domain service.
//!
//! Credential verification happens behind the [`LoginService`] port; this
//! service resolves the admin role from the profile store after every
//! successful verification. Role resolution is fail-closed: a missing or
//! unreadable profile yields a non-admin identity rather than an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Error;
use crate::domain::auth::{Credentials, Identity};
use crate::domain::ports::{AuthCommand, LoginService, LoginServiceError, ProfileStore};
use crate::domain::user::UserId;

fn map_login_error(error: LoginServiceError) -> Error {
    match error {
        LoginServiceError::InvalidCredentials => {
            Error::unauthorized("invalid email or password")
        }
        LoginServiceError::Unavailable { message } => {
            Error::upstream(format!("login service unavailable: {message}"))
        }
    }
}

/// Authentication service implementing the driving port.
#[derive(Clone)]
pub struct AuthService<L, P> {
    login: Arc<L>,
    profiles: Arc<P>,
}

impl<L, P> AuthService<L, P> {
    /// Create a new service with the given adapters.
    pub fn new(login: Arc<L>, profiles: Arc<P>) -> Self {
        Self { login, profiles }
    }
}

impl<L, P> AuthService<L, P>
where
    L: LoginService,
    P: ProfileStore,
{
    /// Resolve the admin flag for a user, answering `false` on any failure.
    async fn resolve_is_admin(&self, user_id: UserId) -> bool {
        match self.profiles.find_by_user_id(user_id).await {
            Ok(Some(profile)) => profile.is_admin,
            Ok(None) => false,
            Err(err) => {
                warn!(%user_id, error = %err, "role lookup failed; treating as non-admin");
                false
            }
        }
    }
}

#[async_trait]
impl<L, P> AuthCommand for AuthService<L, P>
where
    L: LoginService,
    P: ProfileStore,
{
    async fn login(&self, credentials: Credentials) -> Result<Identity, Error> {
        let user_id = self
            .login
            .verify(&credentials)
            .await
            .map_err(map_login_error)?;
        let is_admin = self.resolve_is_admin(user_id).await;
        Ok(Identity { user_id, is_admin })
    }

    async fn admin_login(&self, credentials: Credentials) -> Result<Identity, Error> {
        let identity = self.login(credentials).await?;
        if identity.is_admin {
            Ok(identity)
        } else {
            Err(Error::forbidden("administrator role required"))
        }
    }
}
