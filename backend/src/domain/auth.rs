//! Authentication state and role checks.
//!
//! Identity is passed explicitly to every operation that needs it. Nothing in
//! the domain reads authentication from ambient state, so tests can construct
//! an [`Identity`] directly and concurrent requests cannot observe each
//! other's credentials.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::user::UserId;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// The caller's user id.
    pub user_id: UserId,
    /// Whether the caller holds administrator privileges. Resolved from the
    /// profile at login time and re-checked on every transition into the
    /// authenticated state.
    pub is_admin: bool,
}

/// Login credentials as submitted by a client.
///
/// The password lives in a zeroizing buffer so it is wiped when the value is
/// dropped, and `Debug` output redacts it.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email && *self.password == *other.password
    }
}

impl Eq for Credentials {}

/// Validation errors for credential fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    /// The email was empty or not shaped like an address.
    #[error("a valid email address is required")]
    InvalidEmail,
    /// The password was empty.
    #[error("a password is required")]
    EmptyPassword,
}

impl Credentials {
    /// Validate raw credential fields.
    ///
    /// # Errors
    /// Returns the matching [`CredentialsError`] variant.
    pub fn new(email: &str, password: String) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CredentialsError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password),
        })
    }

    /// Email address suitable for account lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The raw password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Session authentication state machine.
///
/// Transitions: `Unauthenticated -> Authenticating -> Authenticated` on a
/// successful role-checked login, or back to `Unauthenticated` on failure or
/// sign-out. The admin flag is never carried over between logins; every
/// transition into `Authenticated` supplies a freshly resolved [`Identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No user is signed in.
    #[default]
    Unauthenticated,
    /// A login attempt is in flight; role resolution is pending.
    Authenticating,
    /// A user is signed in with a resolved role.
    Authenticated(Identity),
}

impl AuthState {
    /// Begin a login attempt. Any existing identity is discarded first so a
    /// failed re-login cannot leave a stale admin flag behind.
    #[must_use]
    pub fn begin_authentication(self) -> Self {
        Self::Authenticating
    }

    /// Complete a login attempt with the freshly resolved identity, or fall
    /// back to the unauthenticated state when resolution failed.
    #[must_use]
    pub fn complete_authentication(self, identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self::Authenticated(identity),
            None => Self::Unauthenticated,
        }
    }

    /// Sign the current user out.
    #[must_use]
    pub fn sign_out(self) -> Self {
        Self::Unauthenticated
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Authenticated(identity) => Some(*identity),
            _ => None,
        }
    }

    /// Whether the signed-in user is an administrator.
    ///
    /// Fail-closed: unauthenticated and in-flight states answer `false`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Authenticated(identity) if identity.is_admin)
    }
}
