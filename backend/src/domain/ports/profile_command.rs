//! Driving port for self-service profile edits.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::user::Profile;

/// An avatar image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// MIME type of the image.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Driving port for profile write operations. Actors may only edit their own
/// profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Replace the actor's display name.
    async fn update_display_name(
        &self,
        actor: Identity,
        display_name: String,
    ) -> Result<Profile, Error>;

    /// Store a new avatar image and point the actor's profile at it.
    async fn upload_avatar(
        &self,
        actor: Identity,
        upload: AvatarUpload,
    ) -> Result<Profile, Error>;
}

/// Fixture command rejecting every edit.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileCommand;

#[async_trait]
impl ProfileCommand for FixtureProfileCommand {
    async fn update_display_name(
        &self,
        actor: Identity,
        _display_name: String,
    ) -> Result<Profile, Error> {
        Err(Error::not_found(format!(
            "no profile for user {}",
            actor.user_id
        )))
    }

    async fn upload_avatar(
        &self,
        actor: Identity,
        _upload: AvatarUpload,
    ) -> Result<Profile, Error> {
        Err(Error::not_found(format!(
            "no profile for user {}",
            actor.user_id
        )))
    }
}
