//! Port for user profile storage.

use async_trait::async_trait;

use crate::domain::user::{Profile, UserId};

/// Errors raised by profile store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    /// The backing store could not be reached.
    #[error("profile store connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("profile store query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
    /// No profile exists for the given user.
    #[error("no profile for user {user_id}")]
    NotFound {
        /// The user without a profile.
        user_id: UserId,
    },
}

/// Port for reading and editing user profiles.
///
/// The admin flag is read-only through this port; role assignment happens
/// out of band in the auth collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by user id.
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, ProfileStoreError>;

    /// Replace the user's display name and return the updated profile.
    async fn update_display_name(
        &self,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Profile, ProfileStoreError>;

    /// Replace the user's avatar URL and return the updated profile.
    async fn update_avatar_url(
        &self,
        user_id: UserId,
        avatar_url: &str,
    ) -> Result<Profile, ProfileStoreError>;
}

/// Fixture implementation holding no profiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileStore;

#[async_trait]
impl ProfileStore for FixtureProfileStore {
    async fn find_by_user_id(
        &self,
        _user_id: UserId,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(None)
    }

    async fn update_display_name(
        &self,
        user_id: UserId,
        _display_name: &str,
    ) -> Result<Profile, ProfileStoreError> {
        Err(ProfileStoreError::NotFound { user_id })
    }

    async fn update_avatar_url(
        &self,
        user_id: UserId,
        _avatar_url: &str,
    ) -> Result<Profile, ProfileStoreError> {
        Err(ProfileStoreError::NotFound { user_id })
    }
}
