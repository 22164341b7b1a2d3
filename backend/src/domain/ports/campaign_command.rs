//! Driving port for campaign administration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::campaign::{Campaign, CampaignId};

/// Request to create or replace a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWriteRequest {
    /// Public title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Cover image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Fundraising target in currency units.
    pub target_amount: f64,
    /// First day donations are accepted.
    pub start_date: DateTime<Utc>,
    /// Last day donations are accepted.
    pub end_date: DateTime<Utc>,
}

/// Driving port for campaign write operations. All operations require an
/// administrator actor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignCommand: Send + Sync {
    /// Create a campaign with a zero running total.
    async fn create(
        &self,
        actor: Identity,
        request: CampaignWriteRequest,
    ) -> Result<Campaign, Error>;

    /// Replace a campaign's editable fields.
    async fn update(
        &self,
        actor: Identity,
        id: CampaignId,
        request: CampaignWriteRequest,
    ) -> Result<Campaign, Error>;

    /// Delete a campaign.
    async fn delete(&self, actor: Identity, id: CampaignId) -> Result<(), Error>;
}

/// Fixture command rejecting every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCampaignCommand;

#[async_trait]
impl CampaignCommand for FixtureCampaignCommand {
    async fn create(
        &self,
        _actor: Identity,
        _request: CampaignWriteRequest,
    ) -> Result<Campaign, Error> {
        Err(Error::persistence("fixture command does not store campaigns"))
    }

    async fn update(
        &self,
        _actor: Identity,
        id: CampaignId,
        _request: CampaignWriteRequest,
    ) -> Result<Campaign, Error> {
        Err(Error::not_found(format!("campaign {id} not found")))
    }

    async fn delete(&self, _actor: Identity, id: CampaignId) -> Result<(), Error> {
        Err(Error::not_found(format!("campaign {id} not found")))
    }
}
