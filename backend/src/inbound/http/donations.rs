//! Donation handlers.
//!
//! ```text
//! POST /api/v1/donations {"campaignId":1,"amount":12.5}
//! ```
//!
//! Clients that retry submissions send an `Idempotency-Key` header carrying
//! a UUID of their choosing; replays of the same key and payload return the
//! original result with `replayed` set.

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::ports::SubmitDonationRequest;
use crate::domain::{CampaignId, Error, IdempotencyKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Header carrying the client-chosen idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Donation request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationBody {
    /// Campaign to donate to.
    pub campaign_id: i64,
    /// Donation amount in currency units, at most two decimal places.
    pub amount: f64,
}

fn idempotency_key_from(req: &HttpRequest) -> Result<Option<IdempotencyKey>, Error> {
    let Some(raw) = req.headers().get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };
    let raw = raw
        .to_str()
        .map_err(|_| Error::invalid_request("Idempotency-Key must be a UUID"))?;
    IdempotencyKey::parse(raw)
        .map(Some)
        .ok_or_else(|| Error::invalid_request("Idempotency-Key must be a UUID"))
}

/// Submit a donation.
#[utoipa::path(
    post,
    path = "/api/v1/donations",
    request_body = DonationBody,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Client-chosen UUID for safe retries")
    ),
    responses(
        (status = 201, description = "Donation recorded", body = crate::domain::ports::SubmitDonationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Campaign not found", body = Error),
        (status = 409, description = "Idempotency key reused with a different payload", body = Error),
        (status = 500, description = "Donation recorded but total not yet applied", body = Error)
    ),
    tags = ["donations"],
    operation_id = "submitDonation"
)]
#[post("/donations")]
pub async fn submit_donation(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    payload: web::Json<DonationBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_identity()?;
    let idempotency_key = idempotency_key_from(&req)?;
    let body = payload.into_inner();
    let request = SubmitDonationRequest {
        campaign_id: CampaignId(body.campaign_id),
        amount: body.amount,
        idempotency_key,
    };
    let response = state.donations.donate(actor, request).await?;
    Ok(HttpResponse::Created().json(response))
}
