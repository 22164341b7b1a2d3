//! Port for campaign persistence.
//!
//! The running donation total is updated exclusively through
//! [`CampaignRepository::increment_current_amount`], a single atomic
//! operation on the backing store. Adapters must never implement the
//! increment as a read followed by a write.

use async_trait::async_trait;

use crate::domain::campaign::{Campaign, CampaignDraft, CampaignId};

/// Errors raised by campaign repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CampaignRepositoryError {
    /// The backing store could not be reached.
    #[error("campaign store connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("campaign store query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
    /// No campaign exists with the given id.
    #[error("campaign {id} not found")]
    NotFound {
        /// The missing campaign id.
        id: CampaignId,
    },
}

/// Port for campaign storage and the atomic total increment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// List campaigns newest-first.
    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError>;

    /// Fetch a campaign by id.
    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError>;

    /// Create a campaign with a zero running total.
    async fn create(&self, draft: &CampaignDraft) -> Result<Campaign, CampaignRepositoryError>;

    /// Replace a campaign's editable fields, leaving its running total
    /// untouched.
    async fn update(
        &self,
        id: CampaignId,
        draft: &CampaignDraft,
    ) -> Result<Campaign, CampaignRepositoryError>;

    /// Delete a campaign.
    async fn delete(&self, id: CampaignId) -> Result<(), CampaignRepositoryError>;

    /// Atomically add `amount_minor` to the campaign's running total and
    /// return the new total.
    ///
    /// The add and the read-back happen as one operation on the store, so
    /// concurrent increments can interleave in any order without losing
    /// updates.
    async fn increment_current_amount(
        &self,
        id: CampaignId,
        amount_minor: i64,
    ) -> Result<i64, CampaignRepositoryError>;
}

/// Fixture implementation holding no campaigns.
///
/// Lookups return `None`, lists are empty, and mutations answer
/// [`CampaignRepositoryError::NotFound`]. Use it in tests where campaign
/// storage is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCampaignRepository;

#[async_trait]
impl CampaignRepository for FixtureCampaignRepository {
    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        Ok(None)
    }

    async fn create(&self, _draft: &CampaignDraft) -> Result<Campaign, CampaignRepositoryError> {
        Err(CampaignRepositoryError::Query {
            message: "fixture repository does not store campaigns".to_owned(),
        })
    }

    async fn update(
        &self,
        id: CampaignId,
        _draft: &CampaignDraft,
    ) -> Result<Campaign, CampaignRepositoryError> {
        Err(CampaignRepositoryError::NotFound { id })
    }

    async fn delete(&self, id: CampaignId) -> Result<(), CampaignRepositoryError> {
        Err(CampaignRepositoryError::NotFound { id })
    }

    async fn increment_current_amount(
        &self,
        id: CampaignId,
        _amount_minor: i64,
    ) -> Result<i64, CampaignRepositoryError> {
        Err(CampaignRepositoryError::NotFound { id })
    }
}
