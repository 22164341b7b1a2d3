//! In-memory profile store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ProfileStore, ProfileStoreError};
use crate::domain::user::{Profile, UserId};

/// In-memory [`ProfileStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile. Used for seeding.
    pub async fn insert(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn update_display_name(
        &self,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Profile, ProfileStoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&user_id)
            .ok_or(ProfileStoreError::NotFound { user_id })?;
        profile.display_name = display_name.to_owned();
        Ok(profile.clone())
    }

    async fn update_avatar_url(
        &self,
        user_id: UserId,
        avatar_url: &str,
    ) -> Result<Profile, ProfileStoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&user_id)
            .ok_or(ProfileStoreError::NotFound { user_id })?;
        profile.avatar_url = Some(avatar_url.to_owned());
        Ok(profile.clone())
    }
}
