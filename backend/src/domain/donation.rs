//! Donation ledger records.
//!
//! Donations are immutable once appended. The campaign's running total is
//! maintained separately through an atomic increment, so a record existing
//! without its increment applied is a detectable inconsistency, never a lost
//! donation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::campaign::CampaignId;
use crate::domain::money::Amount;
use crate::domain::user::UserId;

/// Identifier of a ledger entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct DonationId(pub i64);

impl std::fmt::Display for DonationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable donation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Ledger entry identifier.
    pub id: DonationId,
    /// Campaign the donation applies to.
    pub campaign_id: CampaignId,
    /// Donating user.
    pub user_id: UserId,
    /// Donated amount.
    pub amount: Amount,
    /// When the donation was recorded.
    pub created_at: DateTime<Utc>,
}

/// Input for appending a donation to the ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewDonation {
    /// Campaign the donation applies to.
    pub campaign_id: CampaignId,
    /// Donating user.
    pub user_id: UserId,
    /// Donated amount.
    pub amount: Amount,
}

/// Aggregated total for a single donor, used for the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorTotal {
    /// Donating user.
    pub user_id: UserId,
    /// Sum of this donor's donations in minor units.
    pub total_minor: i64,
}

/// A leaderboard row with the donor's public name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Donating user.
    pub user_id: UserId,
    /// Public display name, or a placeholder when no profile exists.
    pub display_name: String,
    /// Sum of this donor's donations in minor units.
    pub total_minor: i64,
}
