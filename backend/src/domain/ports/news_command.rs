//! Driving port for news post administration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::news::{NewsPost, NewsPostId};

/// Request to create or replace a news post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsWriteRequest {
    /// Cover image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Name of the publishing organisation or person.
    pub organizer_name: String,
    /// Avatar URL of the organizer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_avatar: Option<String>,
    /// Post body.
    pub description: String,
}

/// Driving port for news write operations. All operations require an
/// administrator actor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsCommand: Send + Sync {
    /// Publish a post.
    async fn create(&self, actor: Identity, request: NewsWriteRequest)
    -> Result<NewsPost, Error>;

    /// Replace a post's fields.
    async fn update(
        &self,
        actor: Identity,
        id: NewsPostId,
        request: NewsWriteRequest,
    ) -> Result<NewsPost, Error>;

    /// Delete a post.
    async fn delete(&self, actor: Identity, id: NewsPostId) -> Result<(), Error>;
}

/// Fixture command rejecting every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNewsCommand;

#[async_trait]
impl NewsCommand for FixtureNewsCommand {
    async fn create(
        &self,
        _actor: Identity,
        _request: NewsWriteRequest,
    ) -> Result<NewsPost, Error> {
        Err(Error::persistence("fixture command does not store posts"))
    }

    async fn update(
        &self,
        _actor: Identity,
        id: NewsPostId,
        _request: NewsWriteRequest,
    ) -> Result<NewsPost, Error> {
        Err(Error::not_found(format!("news post {id} not found")))
    }

    async fn delete(&self, _actor: Identity, id: NewsPostId) -> Result<(), Error> {
        Err(Error::not_found(format!("news post {id} not found")))
    }
}
