//! REST profile store.

use async_trait::async_trait;
use serde_json::json;

use super::client::{RestClient, RestClientError};
use super::rows::ProfileRow;
use crate::domain::ports::{ProfileStore, ProfileStoreError};
use crate::domain::user::{Profile, UserId};

const TABLE: &str = "rest/v1/profiles";

fn map_error(error: RestClientError) -> ProfileStoreError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => {
            ProfileStoreError::Connection {
                message: error.to_string(),
            }
        }
        RestClientError::Status { .. } | RestClientError::Decode { .. } => {
            ProfileStoreError::Query {
                message: error.to_string(),
            }
        }
    }
}

/// [`ProfileStore`] adapter over the hosted store.
#[derive(Debug, Clone)]
pub struct RestProfileStore {
    client: RestClient,
}

impl RestProfileStore {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn patch(
        &self,
        user_id: UserId,
        body: serde_json::Value,
    ) -> Result<Profile, ProfileStoreError> {
        let filter = format!("eq.{user_id}");
        let mut rows: Vec<ProfileRow> = self
            .client
            .patch_rows(TABLE, &[("id", &filter)], &body)
            .await
            .map_err(map_error)?;
        rows.pop()
            .map(ProfileRow::into_domain)
            .ok_or(ProfileStoreError::NotFound { user_id })
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        let filter = format!("eq.{user_id}");
        let mut rows: Vec<ProfileRow> = self
            .client
            .get_rows(TABLE, &[("select", "*"), ("id", &filter)])
            .await
            .map_err(map_error)?;
        Ok(rows.pop().map(ProfileRow::into_domain))
    }

    async fn update_display_name(
        &self,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Profile, ProfileStoreError> {
        self.patch(user_id, json!({ "display_name": display_name }))
            .await
    }

    async fn update_avatar_url(
        &self,
        user_id: UserId,
        avatar_url: &str,
    ) -> Result<Profile, ProfileStoreError> {
        self.patch(user_id, json!({ "avatar_url": avatar_url })).await
    }
}
