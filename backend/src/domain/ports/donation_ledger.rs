//! Port for the append-only donation ledger.

use async_trait::async_trait;

use crate::domain::campaign::CampaignId;
use crate::domain::donation::{Donation, DonorTotal, NewDonation};

/// Errors raised by donation ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonationLedgerError {
    /// The backing store could not be reached.
    #[error("donation ledger connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("donation ledger query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// Port for recording donations and deriving aggregates from them.
///
/// Records are immutable once appended. Donor counts and leaderboard totals
/// are always computed from the records rather than stored, so they cannot
/// drift from the ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationLedger: Send + Sync {
    /// Append a donation record and return it with its assigned id.
    async fn append(&self, donation: &NewDonation) -> Result<Donation, DonationLedgerError>;

    /// Count distinct donating users for a campaign.
    async fn distinct_donor_count(
        &self,
        campaign_id: CampaignId,
    ) -> Result<u64, DonationLedgerError>;

    /// Per-donor totals across all campaigns, largest first, at most `limit`
    /// rows.
    async fn donor_totals(&self, limit: usize) -> Result<Vec<DonorTotal>, DonationLedgerError>;
}

/// Fixture implementation recording nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDonationLedger;

#[async_trait]
impl DonationLedger for FixtureDonationLedger {
    async fn append(&self, donation: &NewDonation) -> Result<Donation, DonationLedgerError> {
        Ok(Donation {
            id: crate::domain::donation::DonationId(0),
            campaign_id: donation.campaign_id,
            user_id: donation.user_id,
            amount: donation.amount,
            created_at: chrono::Utc::now(),
        })
    }

    async fn distinct_donor_count(
        &self,
        _campaign_id: CampaignId,
    ) -> Result<u64, DonationLedgerError> {
        Ok(0)
    }

    async fn donor_totals(&self, _limit: usize) -> Result<Vec<DonorTotal>, DonationLedgerError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;
    use crate::domain::user::UserId;

    #[tokio::test]
    async fn fixture_append_echoes_the_donation() {
        let ledger = FixtureDonationLedger;
        let new = NewDonation {
            campaign_id: CampaignId(1),
            user_id: UserId::random(),
            amount: Amount::from_minor_units(500).expect("valid amount"),
        };
        let recorded = ledger.append(&new).await.expect("fixture append succeeds");
        assert_eq!(recorded.campaign_id, new.campaign_id);
        assert_eq!(recorded.amount, new.amount);
    }

    #[tokio::test]
    async fn fixture_counts_no_donors() {
        let ledger = FixtureDonationLedger;
        let count = ledger
            .distinct_donor_count(CampaignId(1))
            .await
            .expect("fixture count succeeds");
        assert_eq!(count, 0);
    }
}
