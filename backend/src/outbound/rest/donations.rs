//! REST donation ledger.

use async_trait::async_trait;
use serde_json::json;

use super::client::{RestClient, RestClientError};
use super::rows::{DonationRow, DonationWriteRow, DonorTotalRow};
use crate::domain::campaign::CampaignId;
use crate::domain::donation::{Donation, DonorTotal, NewDonation};
use crate::domain::ports::{DonationLedger, DonationLedgerError};

const TABLE: &str = "rest/v1/donations";
/// Server-side aggregate counting distinct donors for a campaign.
const DONOR_COUNT_FN: &str = "distinct_donor_count";
/// Server-side aggregate producing per-donor totals.
const LEADERBOARD_FN: &str = "get_leaderboard";

fn map_error(error: RestClientError) -> DonationLedgerError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => {
            DonationLedgerError::Connection {
                message: error.to_string(),
            }
        }
        RestClientError::Status { .. } | RestClientError::Decode { .. } => {
            DonationLedgerError::Query {
                message: error.to_string(),
            }
        }
    }
}

/// [`DonationLedger`] adapter over the hosted store.
#[derive(Debug, Clone)]
pub struct RestDonationLedger {
    client: RestClient,
}

impl RestDonationLedger {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DonationLedger for RestDonationLedger {
    async fn append(&self, donation: &NewDonation) -> Result<Donation, DonationLedgerError> {
        let row: DonationRow = self
            .client
            .insert_row(
                TABLE,
                &DonationWriteRow {
                    campaign_id: donation.campaign_id.0,
                    user_id: donation.user_id,
                    amount: donation.amount.minor_units(),
                },
            )
            .await
            .map_err(map_error)?;
        row.into_domain()
            .map_err(|message| DonationLedgerError::Query { message })
    }

    async fn distinct_donor_count(
        &self,
        campaign_id: CampaignId,
    ) -> Result<u64, DonationLedgerError> {
        self.client
            .rpc(DONOR_COUNT_FN, &json!({ "p_campaign_id": campaign_id }))
            .await
            .map_err(map_error)
    }

    async fn donor_totals(&self, limit: usize) -> Result<Vec<DonorTotal>, DonationLedgerError> {
        let rows: Vec<DonorTotalRow> = self
            .client
            .rpc(LEADERBOARD_FN, &json!({ "p_limit": limit }))
            .await
            .map_err(map_error)?;
        Ok(rows.into_iter().map(DonorTotalRow::into_domain).collect())
    }
}
