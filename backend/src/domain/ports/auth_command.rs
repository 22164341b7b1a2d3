//! Driving port for login flows.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::auth::{Credentials, Identity};

/// Driving port for authentication operations.
///
/// Both operations resolve the admin flag from the profile store after the
/// credentials verify, so a session never carries a role older than its
/// login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Verify credentials and resolve the caller's identity.
    async fn login(&self, credentials: Credentials) -> Result<Identity, Error>;

    /// As [`AuthCommand::login`], but additionally require the administrator
    /// role. Non-admin accounts are rejected with a forbidden error.
    async fn admin_login(&self, credentials: Credentials) -> Result<Identity, Error>;
}

/// Fixture command rejecting every login.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthCommand;

#[async_trait]
impl AuthCommand for FixtureAuthCommand {
    async fn login(&self, _credentials: Credentials) -> Result<Identity, Error> {
        Err(Error::unauthorized("invalid email or password"))
    }

    async fn admin_login(&self, _credentials: Credentials) -> Result<Identity, Error> {
        Err(Error::unauthorized("invalid email or password"))
    }
}
