//! Port for credential verification.
//!
//! Password storage and token issuance live behind this boundary in the auth
//! collaborator. The application only learns whether a credential pair maps
//! to a user id.

use async_trait::async_trait;

use crate::domain::auth::Credentials;
use crate::domain::user::UserId;

/// Errors raised by login service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginServiceError {
    /// The credentials did not match any account.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The auth collaborator could not be reached or answered with a failure.
    #[error("login service unavailable: {message}")]
    Unavailable {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// Port for verifying login credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials, returning the account's user id on success.
    async fn verify(&self, credentials: &Credentials) -> Result<UserId, LoginServiceError>;
}

/// Fixture implementation rejecting every credential pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn verify(&self, _credentials: &Credentials) -> Result<UserId, LoginServiceError> {
        Err(LoginServiceError::InvalidCredentials)
    }
}
