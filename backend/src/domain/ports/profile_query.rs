//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::user::Profile;

/// Driving port for reading the caller's own profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the actor's profile.
    async fn own_profile(&self, actor: Identity) -> Result<Profile, Error>;
}

/// Fixture query serving no profiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn own_profile(&self, actor: Identity) -> Result<Profile, Error> {
        Err(Error::not_found(format!(
            "no profile for user {}",
            actor.user_id
        )))
    }
}
