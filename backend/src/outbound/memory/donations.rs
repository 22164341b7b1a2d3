//! In-memory donation ledger.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::campaign::CampaignId;
use crate::domain::donation::{Donation, DonationId, DonorTotal, NewDonation};
use crate::domain::ports::{DonationLedger, DonationLedgerError};
use crate::domain::user::UserId;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    donations: Vec<Donation>,
}

/// In-memory [`DonationLedger`] implementation.
#[derive(Debug, Default)]
pub struct MemoryDonationLedger {
    state: RwLock<State>,
}

impl MemoryDonationLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded donations, in append order. For tests and reconciliation.
    pub async fn records(&self) -> Vec<Donation> {
        self.state.read().await.donations.clone()
    }
}

#[async_trait]
impl DonationLedger for MemoryDonationLedger {
    async fn append(&self, donation: &NewDonation) -> Result<Donation, DonationLedgerError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let recorded = Donation {
            id: DonationId(state.next_id),
            campaign_id: donation.campaign_id,
            user_id: donation.user_id,
            amount: donation.amount,
            created_at: Utc::now(),
        };
        state.donations.push(recorded.clone());
        Ok(recorded)
    }

    async fn distinct_donor_count(
        &self,
        campaign_id: CampaignId,
    ) -> Result<u64, DonationLedgerError> {
        let state = self.state.read().await;
        let donors: HashSet<UserId> = state
            .donations
            .iter()
            .filter(|donation| donation.campaign_id == campaign_id)
            .map(|donation| donation.user_id)
            .collect();
        Ok(donors.len() as u64)
    }

    async fn donor_totals(&self, limit: usize) -> Result<Vec<DonorTotal>, DonationLedgerError> {
        let state = self.state.read().await;
        let mut totals: HashMap<UserId, i64> = HashMap::new();
        for donation in &state.donations {
            *totals.entry(donation.user_id).or_default() += donation.amount.minor_units();
        }
        let mut entries: Vec<DonorTotal> = totals
            .into_iter()
            .map(|(user_id, total_minor)| DonorTotal {
                user_id,
                total_minor,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.total_minor
                .cmp(&a.total_minor)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}
