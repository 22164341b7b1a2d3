//! In-memory campaign repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::campaign::{Campaign, CampaignDraft, CampaignId};
use crate::domain::ports::{CampaignRepository, CampaignRepositoryError};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    campaigns: BTreeMap<i64, Campaign>,
}

/// In-memory [`CampaignRepository`] implementation.
#[derive(Debug, Default)]
pub struct MemoryCampaignRepository {
    state: RwLock<State>,
}

impl MemoryCampaignRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for MemoryCampaignRepository {
    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        let state = self.state.read().await;
        let mut campaigns: Vec<Campaign> = state.campaigns.values().cloned().collect();
        campaigns.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(campaigns)
    }

    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        let state = self.state.read().await;
        Ok(state.campaigns.get(&id.0).cloned())
    }

    async fn create(&self, draft: &CampaignDraft) -> Result<Campaign, CampaignRepositoryError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let campaign = Campaign {
            id: CampaignId(state.next_id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            thumbnail_url: draft.thumbnail_url.clone(),
            target_amount: draft.target_amount,
            current_amount_minor: 0,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: Utc::now(),
        };
        state.campaigns.insert(campaign.id.0, campaign.clone());
        Ok(campaign)
    }

    async fn update(
        &self,
        id: CampaignId,
        draft: &CampaignDraft,
    ) -> Result<Campaign, CampaignRepositoryError> {
        let mut state = self.state.write().await;
        let campaign = state
            .campaigns
            .get_mut(&id.0)
            .ok_or(CampaignRepositoryError::NotFound { id })?;
        campaign.title = draft.title.clone();
        campaign.description = draft.description.clone();
        campaign.thumbnail_url = draft.thumbnail_url.clone();
        campaign.target_amount = draft.target_amount;
        campaign.start_date = draft.start_date;
        campaign.end_date = draft.end_date;
        Ok(campaign.clone())
    }

    async fn delete(&self, id: CampaignId) -> Result<(), CampaignRepositoryError> {
        let mut state = self.state.write().await;
        state
            .campaigns
            .remove(&id.0)
            .map(|_| ())
            .ok_or(CampaignRepositoryError::NotFound { id })
    }

    async fn increment_current_amount(
        &self,
        id: CampaignId,
        amount_minor: i64,
    ) -> Result<i64, CampaignRepositoryError> {
        let mut state = self.state.write().await;
        let campaign = state
            .campaigns
            .get_mut(&id.0)
            .ok_or(CampaignRepositoryError::NotFound { id })?;
        let new_total = campaign
            .current_amount_minor
            .checked_add(amount_minor)
            .ok_or_else(|| CampaignRepositoryError::Query {
                message: format!("campaign {id} total overflow"),
            })?;
        campaign.current_amount_minor = new_total;
        Ok(new_total)
    }
}
