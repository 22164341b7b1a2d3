//! Driving port for donation submission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::campaign::CampaignId;
use crate::domain::donation::DonationId;
use crate::domain::idempotency::IdempotencyKey;

/// Request to submit a donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDonationRequest {
    /// Campaign to donate to.
    pub campaign_id: CampaignId,
    /// Donation amount in currency units, at most two decimal places.
    pub amount: f64,
    /// Optional client-chosen key for safe retries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<IdempotencyKey>,
}

/// Response from a completed donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDonationResponse {
    /// Identifier of the recorded donation.
    pub donation_id: DonationId,
    /// Campaign the donation applied to.
    pub campaign_id: CampaignId,
    /// The campaign's running total after this donation, in minor units.
    pub new_total_minor: i64,
    /// True when this response was replayed from an earlier execution of the
    /// same idempotency key.
    pub replayed: bool,
}

/// Driving port for donation write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationCommand: Send + Sync {
    /// Record a donation and apply it to the campaign total.
    ///
    /// The donation record is appended before the total is incremented; if
    /// the increment cannot be applied after bounded retries the error is
    /// [`crate::domain::ErrorCode::InconsistentState`] and the record is kept
    /// for reconciliation.
    async fn donate(
        &self,
        actor: Identity,
        request: SubmitDonationRequest,
    ) -> Result<SubmitDonationResponse, Error>;
}

/// Fixture command acknowledging donations without recording them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDonationCommand;

#[async_trait]
impl DonationCommand for FixtureDonationCommand {
    async fn donate(
        &self,
        _actor: Identity,
        request: SubmitDonationRequest,
    ) -> Result<SubmitDonationResponse, Error> {
        let amount = crate::domain::money::Amount::from_major_units(request.amount)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(SubmitDonationResponse {
            donation_id: DonationId(0),
            campaign_id: request.campaign_id,
            new_total_minor: amount.minor_units(),
            replayed: false,
        })
    }
}
