//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all HTTP endpoints from the inbound layer, the shared
//! error schema, and the session cookie security scheme. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    CampaignWriteRequest, NewsWriteRequest, PostCommentRequest, SubmitDonationRequest,
    SubmitDonationResponse,
};
use crate::domain::{
    Campaign, CampaignProgress, ClassifiedDay, Comment, Error, ErrorCode, Identity,
    LeaderboardEntry, NewsPost, Profile,
};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::donations::DonationBody;
use crate::inbound::http::profile::DisplayNameBody;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Donation platform backend API",
        description = "HTTP interface for campaigns, donations, comments, news, profiles, and weather."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::admin_login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::campaigns::list_campaigns,
        crate::inbound::http::campaigns::leaderboard,
        crate::inbound::http::campaigns::get_campaign,
        crate::inbound::http::campaigns::campaign_progress,
        crate::inbound::http::campaigns::create_campaign,
        crate::inbound::http::campaigns::update_campaign,
        crate::inbound::http::campaigns::delete_campaign,
        crate::inbound::http::donations::submit_donation,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::post_comment,
        crate::inbound::http::news::list_news,
        crate::inbound::http::news::get_news,
        crate::inbound::http::news::create_news,
        crate::inbound::http::news::update_news,
        crate::inbound::http::news::delete_news,
        crate::inbound::http::profile::own_profile,
        crate::inbound::http::profile::update_display_name,
        crate::inbound::http::profile::upload_avatar,
        crate::inbound::http::weather::five_day_forecast,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        LoginRequest,
        Campaign,
        CampaignProgress,
        CampaignWriteRequest,
        LeaderboardEntry,
        DonationBody,
        SubmitDonationRequest,
        SubmitDonationResponse,
        Comment,
        PostCommentRequest,
        NewsPost,
        NewsWriteRequest,
        Profile,
        DisplayNameBody,
        ClassifiedDay,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "campaigns", description = "Fundraising campaigns and leaderboards"),
        (name = "donations", description = "Donation submission"),
        (name = "comments", description = "Comment threads"),
        (name = "news", description = "News posts"),
        (name = "profile", description = "Self-service profile management"),
        (name = "weather", description = "Severity-classified forecasts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
