//! Donation campaign entities and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::money::Amount;

/// Maximum campaign title length in characters.
pub const TITLE_MAX: usize = 200;

/// Identifier of a donation campaign.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct CampaignId(pub i64);

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for campaign fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CampaignValidationError {
    /// The title was empty after trimming.
    #[error("campaign title must not be empty")]
    EmptyTitle,
    /// The title exceeded the maximum length.
    #[error("campaign title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The end date preceded the start date.
    #[error("campaign end date must not be before its start date")]
    EndBeforeStart,
}

/// A fundraising campaign with a target and a running total.
///
/// `current_amount_minor` is the ledger total in minor units. It starts at
/// zero and only ever changes through atomic increments, so it is a plain
/// integer rather than an [`Amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign identifier.
    pub id: CampaignId,
    /// Public title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Cover image URL, if any.
    pub thumbnail_url: Option<String>,
    /// Fundraising target.
    pub target_amount: Amount,
    /// Running donation total in minor units.
    pub current_amount_minor: i64,
    /// First day donations are accepted.
    pub start_date: DateTime<Utc>,
    /// Last day donations are accepted.
    pub end_date: DateTime<Utc>,
    /// When the campaign was created.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating or replacing a campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    /// Public title, trimmed.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Cover image URL, if any.
    pub thumbnail_url: Option<String>,
    /// Fundraising target.
    pub target_amount: Amount,
    /// First day donations are accepted.
    pub start_date: DateTime<Utc>,
    /// Last day donations are accepted.
    pub end_date: DateTime<Utc>,
}

impl CampaignDraft {
    /// Validate raw campaign fields into a draft.
    ///
    /// # Errors
    /// Returns the matching [`CampaignValidationError`] variant.
    pub fn new(
        title: &str,
        description: &str,
        thumbnail_url: Option<String>,
        target_amount: Amount,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Self, CampaignValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CampaignValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(CampaignValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if end_date < start_date {
            return Err(CampaignValidationError::EndBeforeStart);
        }
        Ok(Self {
            title: title.to_owned(),
            description: description.trim().to_owned(),
            thumbnail_url,
            target_amount,
            start_date,
            end_date,
        })
    }
}

/// Snapshot of a campaign's fundraising progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProgress {
    /// Campaign identifier.
    pub campaign_id: CampaignId,
    /// Running donation total in minor units.
    pub current_amount_minor: i64,
    /// Fundraising target.
    pub target_amount: Amount,
    /// Number of distinct donors, computed from the ledger.
    pub donor_count: u64,
}
