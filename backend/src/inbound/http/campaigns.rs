//! Campaign handlers.
//!
//! ```text
//! GET    /api/v1/campaigns
//! GET    /api/v1/campaigns/leaderboard?limit=10
//! GET    /api/v1/campaigns/{id}
//! GET    /api/v1/campaigns/{id}/progress
//! POST   /api/v1/campaigns            (admin)
//! PUT    /api/v1/campaigns/{id}       (admin)
//! DELETE /api/v1/campaigns/{id}       (admin)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::ports::CampaignWriteRequest;
use crate::domain::{Campaign, CampaignId, CampaignProgress, Error, LeaderboardEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Default number of leaderboard rows.
const LEADERBOARD_DEFAULT_LIMIT: usize = 10;
/// Upper bound on requested leaderboard rows.
const LEADERBOARD_MAX_LIMIT: usize = 100;

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

/// List campaigns, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    responses(
        (status = 200, description = "Campaigns", body = [Campaign])
    ),
    tags = ["campaigns"],
    operation_id = "listCampaigns",
    security([])
)]
#[get("/campaigns")]
pub async fn list_campaigns(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Campaign>>> {
    Ok(web::Json(state.campaigns.list().await?))
}

/// Top donors across all campaigns.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/leaderboard",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Donor leaderboard", body = [LeaderboardEntry]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "leaderboard",
    security([])
)]
#[get("/campaigns/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
    params: web::Query<LeaderboardParams>,
) -> ApiResult<web::Json<Vec<LeaderboardEntry>>> {
    let limit = params.limit.unwrap_or(LEADERBOARD_DEFAULT_LIMIT);
    if limit == 0 || limit > LEADERBOARD_MAX_LIMIT {
        return Err(Error::invalid_request(format!(
            "limit must be between 1 and {LEADERBOARD_MAX_LIMIT}"
        )));
    }
    Ok(web::Json(state.campaigns.leaderboard(limit).await?))
}

/// Fetch a single campaign.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign", body = Campaign),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "getCampaign",
    security([])
)]
#[get("/campaigns/{id}")]
pub async fn get_campaign(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Campaign>> {
    let id = CampaignId(path.into_inner());
    Ok(web::Json(state.campaigns.get(id).await?))
}

/// Fundraising progress for a campaign.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}/progress",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Progress snapshot", body = CampaignProgress),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "campaignProgress",
    security([])
)]
#[get("/campaigns/{id}/progress")]
pub async fn campaign_progress(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CampaignProgress>> {
    let id = CampaignId(path.into_inner());
    Ok(web::Json(state.campaigns.progress(id).await?))
}

/// Create a campaign. Requires the administrator role.
#[utoipa::path(
    post,
    path = "/api/v1/campaigns",
    request_body = CampaignWriteRequest,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "createCampaign"
)]
#[post("/campaigns")]
pub async fn create_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CampaignWriteRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_admin()?;
    let campaign = state
        .campaign_admin
        .create(actor, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(campaign))
}

/// Replace a campaign's editable fields. Requires the administrator role.
#[utoipa::path(
    put,
    path = "/api/v1/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    request_body = CampaignWriteRequest,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "updateCampaign"
)]
#[put("/campaigns/{id}")]
pub async fn update_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<CampaignWriteRequest>,
) -> ApiResult<web::Json<Campaign>> {
    let actor = session.require_admin()?;
    let id = CampaignId(path.into_inner());
    let campaign = state
        .campaign_admin
        .update(actor, id, payload.into_inner())
        .await?;
    Ok(web::Json(campaign))
}

/// Delete a campaign. Requires the administrator role.
#[utoipa::path(
    delete,
    path = "/api/v1/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "deleteCampaign"
)]
#[delete("/campaigns/{id}")]
pub async fn delete_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_admin()?;
    let id = CampaignId(path.into_inner());
    state.campaign_admin.delete(actor, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
