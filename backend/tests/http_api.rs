//! HTTP API tests over the in-memory adapter stack.
//!
//! Exercises the full request path: session middleware, handlers, domain
//! services, and adapters, with real cookies carrying the identity between
//! requests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use backend::domain::ports::FixtureWeatherSource;
use backend::domain::{
    AuthService, CommentService, DonationService, NewsService, Profile, ProfileService, UserId,
    WeatherService,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, campaigns, donations, profile, weather};
use backend::outbound::broadcast::BroadcastCommentHub;
use backend::outbound::memory::{
    MemoryBlobStore, MemoryCampaignRepository, MemoryCommentRepository, MemoryDonationLedger,
    MemoryIdempotencyRepository, MemoryLoginService, MemoryNewsRepository, MemoryProfileStore,
};

const ADMIN_EMAIL: &str = "admin@example.com";
const USER_EMAIL: &str = "donor@example.com";
const PASSWORD: &str = "correct horse battery staple";

struct TestBackend {
    state: HttpState,
    login: Arc<MemoryLoginService>,
    profiles: Arc<MemoryProfileStore>,
}

fn backend() -> TestBackend {
    let login = Arc::new(MemoryLoginService::new());
    let profiles = Arc::new(MemoryProfileStore::new());

    let donation_service = Arc::new(DonationService::new(
        Arc::new(MemoryCampaignRepository::new()),
        Arc::new(MemoryDonationLedger::new()),
        Arc::new(MemoryIdempotencyRepository::new()),
        profiles.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(
        Arc::new(MemoryCommentRepository::new()),
        Arc::new(BroadcastCommentHub::new()),
        profiles.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(login.clone(), profiles.clone()));
    let news_service = Arc::new(NewsService::new(Arc::new(MemoryNewsRepository::new())));
    let profile_service = Arc::new(ProfileService::new(
        profiles.clone(),
        Arc::new(MemoryBlobStore::new()),
    ));

    let state = HttpState {
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
        weather: Arc::new(WeatherService::new(Arc::new(FixtureWeatherSource))),
    };
    TestBackend {
        state,
        login,
        profiles,
    }
}

impl TestBackend {
    async fn seed_account(&self, email: &str, is_admin: bool) -> UserId {
        let user_id = self.login.register(email, PASSWORD).await;
        self.profiles
            .insert(Profile {
                user_id,
                display_name: email.split('@').next().unwrap_or("user").to_owned(),
                avatar_url: None,
                is_admin,
                created_at: Utc::now(),
            })
            .await;
        user_id
    }
}

async fn spawn(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let key = Key::generate();
    test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_name("session".into())
                        .cookie_secure(false)
                        .build(),
                )
                .service(auth::login)
                .service(auth::admin_login)
                .service(auth::logout)
                .service(campaigns::list_campaigns)
                .service(campaigns::leaderboard)
                .service(campaigns::get_campaign)
                .service(campaigns::campaign_progress)
                .service(campaigns::create_campaign)
                .service(donations::submit_donation)
                .service(profile::own_profile)
                .service(weather::five_day_forecast),
        ),
    )
    .await
}

fn session_cookie(resp: &ServiceResponse<impl MessageBody>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

async fn sign_in(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    path: &str,
    email: &str,
) -> Cookie<'static> {
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri(path)
            .set_json(json!({ "email": email, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success(), "login failed: {}", resp.status());
    session_cookie(&resp)
}

fn campaign_body() -> Value {
    json!({
        "title": "School rebuild",
        "description": "Replace the storm-damaged roof",
        "targetAmount": 5000.0,
        "startDate": Utc::now(),
        "endDate": Utc::now() + Duration::days(14),
    })
}

async fn create_campaign(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    admin_cookie: &Cookie<'static>,
) -> i64 {
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .cookie(admin_cookie.clone())
            .set_json(campaign_body())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    body.get("id").and_then(Value::as_i64).expect("campaign id")
}

#[actix_web::test]
async fn login_then_donate_updates_campaign_progress() {
    let backend = backend();
    backend.seed_account(ADMIN_EMAIL, true).await;
    backend.seed_account(USER_EMAIL, false).await;
    let app = spawn(backend.state).await;

    let admin = sign_in(&app, "/api/v1/auth/admin-login", ADMIN_EMAIL).await;
    let campaign_id = create_campaign(&app, &admin).await;

    let donor = sign_in(&app, "/api/v1/auth/login", USER_EMAIL).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/donations")
            .cookie(donor)
            .set_json(json!({ "campaignId": campaign_id, "amount": 12.5 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("newTotalMinor").and_then(Value::as_i64), Some(1250));
    assert_eq!(body.get("replayed").and_then(Value::as_bool), Some(false));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/campaigns/{campaign_id}/progress"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let progress: Value = test::read_body_json(resp).await;
    assert_eq!(
        progress.get("currentAmountMinor").and_then(Value::as_i64),
        Some(1250)
    );
    assert_eq!(progress.get("donorCount").and_then(Value::as_u64), Some(1));
}

#[actix_web::test]
async fn replayed_donations_return_the_original_result() {
    let backend = backend();
    backend.seed_account(ADMIN_EMAIL, true).await;
    backend.seed_account(USER_EMAIL, false).await;
    let app = spawn(backend.state).await;

    let admin = sign_in(&app, "/api/v1/auth/admin-login", ADMIN_EMAIL).await;
    let campaign_id = create_campaign(&app, &admin).await;
    let donor = sign_in(&app, "/api/v1/auth/login", USER_EMAIL).await;

    let request = || {
        test::TestRequest::post()
            .uri("/api/v1/donations")
            .cookie(donor.clone())
            .insert_header(("Idempotency-Key", "7b1db4a8-21a2-46b8-b6e9-dd40b3c8ad2a"))
            .set_json(json!({ "campaignId": campaign_id, "amount": 40.0 }))
            .to_request()
    };

    let first = test::call_service(&app, request()).await;
    assert_eq!(first.status(), 201);
    let first: Value = test::read_body_json(first).await;
    assert_eq!(first.get("replayed").and_then(Value::as_bool), Some(false));

    let second = test::call_service(&app, request()).await;
    assert_eq!(second.status(), 201);
    let second: Value = test::read_body_json(second).await;
    assert_eq!(second.get("replayed").and_then(Value::as_bool), Some(true));
    assert_eq!(first.get("donationId"), second.get("donationId"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/campaigns/{campaign_id}/progress"))
            .to_request(),
    )
    .await;
    let progress: Value = test::read_body_json(resp).await;
    assert_eq!(
        progress.get("currentAmountMinor").and_then(Value::as_i64),
        Some(4000)
    );
}

#[actix_web::test]
async fn anonymous_donations_are_unauthorised() {
    let backend = backend();
    let app = spawn(backend.state).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/donations")
            .set_json(json!({ "campaignId": 1, "amount": 10.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
}

#[actix_web::test]
async fn non_admins_cannot_create_campaigns() {
    let backend = backend();
    backend.seed_account(USER_EMAIL, false).await;
    let app = spawn(backend.state).await;

    let donor = sign_in(&app, "/api/v1/auth/login", USER_EMAIL).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .cookie(donor)
            .set_json(campaign_body())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn fractional_minor_unit_amounts_are_rejected() {
    let backend = backend();
    backend.seed_account(ADMIN_EMAIL, true).await;
    backend.seed_account(USER_EMAIL, false).await;
    let app = spawn(backend.state).await;

    let admin = sign_in(&app, "/api/v1/auth/admin-login", ADMIN_EMAIL).await;
    let campaign_id = create_campaign(&app, &admin).await;
    let donor = sign_in(&app, "/api/v1/auth/login", USER_EMAIL).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/donations")
            .cookie(donor)
            .set_json(json!({ "campaignId": campaign_id, "amount": 10.123 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let backend = backend();
    backend.seed_account(USER_EMAIL, false).await;
    let app = spawn(backend.state).await;

    let cookie = sign_in(&app, "/api/v1/auth/login", USER_EMAIL).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 204);
    let cleared = session_cookie(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn wrong_passwords_do_not_issue_a_session() {
    let backend = backend();
    backend.seed_account(USER_EMAIL, false).await;
    let app = spawn(backend.state).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": USER_EMAIL, "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    assert!(
        resp.response().cookies().all(|c| c.name() != "session"),
        "failed login must not set a session cookie"
    );
}

#[actix_web::test]
async fn unknown_cities_are_rejected_with_the_covered_list() {
    let backend = backend();
    let app = spawn(backend.state).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/weather/atlantis")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/weather/yangon")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}
