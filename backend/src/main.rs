//! Backend entry-point: wires REST endpoints, the comment stream, and
//! OpenAPI docs.
//!
//! Configuration is environment-driven:
//! - `SESSION_KEY_FILE` points at the cookie signing key
//!   (`SESSION_ALLOW_EPHEMERAL=1` permits a generated key outside debug
//!   builds)
//! - `SESSION_COOKIE_SECURE=0` disables the `Secure` cookie flag for local
//!   HTTP
//! - `STORE_URL` and `STORE_API_KEY` select the hosted data store; when
//!   absent the server runs on in-memory adapters and loses state on restart
//! - `WEATHER_API_KEY` (and optionally `WEATHER_BASE_URL`) enable the live
//!   forecast source

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{
    BlobStore, CampaignRepository, CommentRepository, DonationLedger, FixtureWeatherSource,
    IdempotencyRepository, LoginService, NewsRepository, ProfileStore, WeatherQuery,
};
use backend::domain::{
    AuthService, CommentService, DonationService, NewsService, ProfileService, WeatherService,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, campaigns, comments, donations, news, profile, weather};
use backend::inbound::ws;
use backend::inbound::ws::state::WsState;
use backend::outbound::broadcast::BroadcastCommentHub;
use backend::outbound::memory::{
    MemoryBlobStore, MemoryCampaignRepository, MemoryCommentRepository, MemoryDonationLedger,
    MemoryIdempotencyRepository, MemoryLoginService, MemoryNewsRepository, MemoryProfileStore,
};
use backend::outbound::rest::{
    RestBlobStore, RestCampaignRepository, RestClient, RestClientConfig, RestCommentRepository,
    RestDonationLedger, RestIdempotencyRepository, RestLoginService, RestNewsRepository,
    RestProfileStore,
};
use backend::outbound::weather::AccuWeatherSource;

const DEFAULT_WEATHER_BASE_URL: &str = "https://dataservice.accuweather.com/";
const DEFAULT_AVATAR_BUCKET: &str = "avatars";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let weather = weather_query()?;
    let (http_state, ws_state) = match store_config()? {
        Some(config) => {
            let client = RestClient::new(config).map_err(std::io::Error::other)?;
            let bucket =
                env::var("STORE_AVATAR_BUCKET").unwrap_or_else(|_| DEFAULT_AVATAR_BUCKET.into());
            build_states(
                Arc::new(RestCampaignRepository::new(client.clone())),
                Arc::new(RestDonationLedger::new(client.clone())),
                Arc::new(RestIdempotencyRepository::new(client.clone())),
                Arc::new(RestProfileStore::new(client.clone())),
                Arc::new(RestCommentRepository::new(client.clone())),
                Arc::new(RestNewsRepository::new(client.clone())),
                Arc::new(RestBlobStore::new(client.clone(), bucket)),
                Arc::new(RestLoginService::new(client)),
                weather,
            )
        }
        None => {
            warn!("STORE_URL not set; using in-memory adapters (state is lost on restart)");
            memory_states(weather).await
        }
    };

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(auth::login)
            .service(auth::admin_login)
            .service(auth::logout)
            .service(campaigns::list_campaigns)
            .service(campaigns::leaderboard)
            .service(campaigns::get_campaign)
            .service(campaigns::campaign_progress)
            .service(campaigns::create_campaign)
            .service(campaigns::update_campaign)
            .service(campaigns::delete_campaign)
            .service(donations::submit_donation)
            .service(comments::list_comments)
            .service(comments::post_comment)
            .service(news::list_news)
            .service(news::get_news)
            .service(news::create_news)
            .service(news::update_news)
            .service(news::delete_news)
            .service(profile::own_profile)
            .service(profile::update_display_name)
            .service(profile::upload_avatar)
            .service(weather::five_day_forecast);

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(web::Data::new(http_state.clone()))
            .app_data(web::Data::new(ws_state.clone()))
            .wrap(Trace)
            .service(api)
            .service(ws::comment_stream)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(("0.0.0.0", 8080))?;

    health_state.mark_ready();
    server.run().await
}

/// Read the session signing key, falling back to an ephemeral key where
/// permitted.
fn session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Hosted-store configuration, when both toggles are present.
fn store_config() -> std::io::Result<Option<RestClientConfig>> {
    let Ok(raw_url) = env::var("STORE_URL") else {
        return Ok(None);
    };
    let api_key = env::var("STORE_API_KEY")
        .map_err(|_| std::io::Error::other("STORE_URL is set but STORE_API_KEY is not"))?;
    let base_url = Url::parse(&raw_url)
        .map_err(|e| std::io::Error::other(format!("invalid STORE_URL: {e}")))?;
    Ok(Some(RestClientConfig::new(base_url, api_key)))
}

/// The forecast source: live when an API key is configured, empty otherwise.
fn weather_query() -> std::io::Result<Arc<dyn WeatherQuery>> {
    match env::var("WEATHER_API_KEY") {
        Ok(api_key) => {
            let base =
                env::var("WEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_WEATHER_BASE_URL.into());
            let base_url = Url::parse(&base)
                .map_err(|e| std::io::Error::other(format!("invalid WEATHER_BASE_URL: {e}")))?;
            let source = AccuWeatherSource::new(base_url, api_key)
                .map_err(std::io::Error::other)?;
            Ok(Arc::new(WeatherService::new(Arc::new(source))))
        }
        Err(_) => {
            warn!("WEATHER_API_KEY not set; forecasts will be empty");
            Ok(Arc::new(WeatherService::new(Arc::new(
                FixtureWeatherSource,
            ))))
        }
    }
}

/// In-memory adapter stack, optionally seeded with a development admin via
/// `DEV_ADMIN_EMAIL` and `DEV_ADMIN_PASSWORD`.
async fn memory_states(weather: Arc<dyn WeatherQuery>) -> (HttpState, WsState) {
    let login = Arc::new(MemoryLoginService::new());
    let profiles = Arc::new(MemoryProfileStore::new());

    if let (Ok(email), Ok(password)) =
        (env::var("DEV_ADMIN_EMAIL"), env::var("DEV_ADMIN_PASSWORD"))
    {
        let user_id = login.register(&email, &password).await;
        profiles
            .insert(backend::domain::Profile {
                user_id,
                display_name: "Administrator".into(),
                avatar_url: None,
                is_admin: true,
                created_at: chrono::Utc::now(),
            })
            .await;
        warn!(email = %email, "seeded development admin account");
    }

    build_states(
        Arc::new(MemoryCampaignRepository::new()),
        Arc::new(MemoryDonationLedger::new()),
        Arc::new(MemoryIdempotencyRepository::new()),
        profiles,
        Arc::new(MemoryCommentRepository::new()),
        Arc::new(MemoryNewsRepository::new()),
        Arc::new(MemoryBlobStore::new()),
        login,
        weather,
    )
}

/// Assemble the domain services over one adapter stack and bundle them for
/// the inbound layers.
#[allow(clippy::too_many_arguments)]
fn build_states<CR, DL, IR, PS, CM, NR, BS, LS>(
    campaigns: Arc<CR>,
    ledger: Arc<DL>,
    idempotency: Arc<IR>,
    profiles: Arc<PS>,
    comments: Arc<CM>,
    news: Arc<NR>,
    blobs: Arc<BS>,
    login: Arc<LS>,
    weather: Arc<dyn WeatherQuery>,
) -> (HttpState, WsState)
where
    CR: CampaignRepository + 'static,
    DL: DonationLedger + 'static,
    IR: IdempotencyRepository + 'static,
    PS: ProfileStore + 'static,
    CM: CommentRepository + 'static,
    NR: NewsRepository + 'static,
    BS: BlobStore + 'static,
    LS: LoginService + 'static,
{
    let hub = Arc::new(BroadcastCommentHub::new());
    let donation_service = Arc::new(DonationService::new(
        campaigns,
        ledger,
        idempotency,
        profiles.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(comments, hub, profiles.clone()));
    let auth_service = Arc::new(AuthService::new(login, profiles.clone()));
    let news_service = Arc::new(NewsService::new(news));
    let profile_service = Arc::new(ProfileService::new(profiles, blobs));

    let http = HttpState {
        auth: auth_service,
        donations: donation_service.clone(),
        campaigns: donation_service.clone(),
        campaign_admin: donation_service,
        comments: comment_service.clone(),
        comment_posts: comment_service,
        news: news_service.clone(),
        news_admin: news_service,
        profile: profile_service.clone(),
        profile_edits: profile_service,
        weather,
    };
    let ws = WsState::new(http.comments.clone());
    (http, ws)
}
