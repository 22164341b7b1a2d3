//! Profile domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::ports::{
    AvatarUpload, BlobStore, BlobStoreError, ProfileCommand, ProfileQuery, ProfileStore,
    ProfileStoreError,
};
use crate::domain::user::{Profile, validate_display_name};

/// Image types accepted for avatar uploads.
const ALLOWED_AVATAR_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];
/// Maximum avatar upload size in bytes.
const AVATAR_MAX_BYTES: usize = 2 * 1024 * 1024;

fn map_store_error(error: ProfileStoreError) -> Error {
    match error {
        ProfileStoreError::Connection { message } => {
            Error::persistence(format!("profile store unavailable: {message}"))
        }
        ProfileStoreError::Query { message } => {
            Error::persistence(format!("profile store error: {message}"))
        }
        ProfileStoreError::NotFound { user_id } => {
            Error::not_found(format!("no profile for user {user_id}"))
        }
    }
}

fn map_blob_error(error: BlobStoreError) -> Error {
    match error {
        BlobStoreError::Connection { message } => {
            Error::persistence(format!("blob store unavailable: {message}"))
        }
        BlobStoreError::Upload { message } => {
            Error::persistence(format!("avatar upload failed: {message}"))
        }
    }
}

/// Profile service implementing the driving ports.
#[derive(Clone)]
pub struct ProfileService<P, B> {
    profiles: Arc<P>,
    blobs: Arc<B>,
}

impl<P, B> ProfileService<P, B> {
    /// Create a new service with the given adapters.
    pub fn new(profiles: Arc<P>, blobs: Arc<B>) -> Self {
        Self { profiles, blobs }
    }
}

#[async_trait]
impl<P, B> ProfileQuery for ProfileService<P, B>
where
    P: ProfileStore,
    B: BlobStore,
{
    async fn own_profile(&self, actor: Identity) -> Result<Profile, Error> {
        self.profiles
            .find_by_user_id(actor.user_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no profile for user {}", actor.user_id)))
    }
}

#[async_trait]
impl<P, B> ProfileCommand for ProfileService<P, B>
where
    P: ProfileStore,
    B: BlobStore,
{
    async fn update_display_name(
        &self,
        actor: Identity,
        display_name: String,
    ) -> Result<Profile, Error> {
        let display_name = validate_display_name(&display_name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.profiles
            .update_display_name(actor.user_id, &display_name)
            .await
            .map_err(map_store_error)
    }

    async fn upload_avatar(&self, actor: Identity, upload: AvatarUpload) -> Result<Profile, Error> {
        if !ALLOWED_AVATAR_TYPES.contains(&upload.content_type.as_str()) {
            return Err(Error::invalid_request(format!(
                "unsupported avatar type {}",
                upload.content_type
            )));
        }
        if upload.bytes.is_empty() {
            return Err(Error::invalid_request("avatar upload is empty"));
        }
        if upload.bytes.len() > AVATAR_MAX_BYTES {
            return Err(Error::invalid_request("avatar upload too large"));
        }

        let extension = match upload.content_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        };
        let path = format!("avatars/{}.{extension}", actor.user_id);
        let url = self
            .blobs
            .put(&path, &upload.content_type, upload.bytes)
            .await
            .map_err(map_blob_error)?;
        self.profiles
            .update_avatar_url(actor.user_id, &url)
            .await
            .map_err(map_store_error)
    }
}
