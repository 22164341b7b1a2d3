//! Driving port for campaign reads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::campaign::{Campaign, CampaignId, CampaignProgress};
use crate::domain::donation::LeaderboardEntry;

/// Driving port for campaign read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignQuery: Send + Sync {
    /// List campaigns newest-first.
    async fn list(&self) -> Result<Vec<Campaign>, Error>;

    /// Fetch a campaign by id.
    async fn get(&self, id: CampaignId) -> Result<Campaign, Error>;

    /// The campaign's fundraising progress with a computed donor count.
    async fn progress(&self, id: CampaignId) -> Result<CampaignProgress, Error>;

    /// Top donors across all campaigns, largest total first.
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, Error>;
}

/// Fixture query serving no campaigns.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCampaignQuery;

#[async_trait]
impl CampaignQuery for FixtureCampaignQuery {
    async fn list(&self) -> Result<Vec<Campaign>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, id: CampaignId) -> Result<Campaign, Error> {
        Err(Error::not_found(format!("campaign {id} not found")))
    }

    async fn progress(&self, id: CampaignId) -> Result<CampaignProgress, Error> {
        Err(Error::not_found(format!("campaign {id} not found")))
    }

    async fn leaderboard(&self, _limit: usize) -> Result<Vec<LeaderboardEntry>, Error> {
        Ok(Vec::new())
    }
}
