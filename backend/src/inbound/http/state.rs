//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthCommand, CampaignCommand, CampaignQuery, CommentCommand, CommentQuery, DonationCommand,
    NewsCommand, NewsQuery, ProfileCommand, ProfileQuery, WeatherQuery,
};
use crate::domain::ports::{
    FixtureAuthCommand, FixtureCampaignCommand, FixtureCampaignQuery, FixtureCommentCommand,
    FixtureCommentQuery, FixtureDonationCommand, FixtureNewsCommand, FixtureNewsQuery,
    FixtureProfileCommand, FixtureProfileQuery, FixtureWeatherQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub donations: Arc<dyn DonationCommand>,
    pub campaigns: Arc<dyn CampaignQuery>,
    pub campaign_admin: Arc<dyn CampaignCommand>,
    pub comments: Arc<dyn CommentQuery>,
    pub comment_posts: Arc<dyn CommentCommand>,
    pub news: Arc<dyn NewsQuery>,
    pub news_admin: Arc<dyn NewsCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_edits: Arc<dyn ProfileCommand>,
    pub weather: Arc<dyn WeatherQuery>,
}

impl Default for HttpState {
    /// A state backed entirely by fixtures, useful as a base for tests that
    /// only exercise a few ports.
    fn default() -> Self {
        Self {
            auth: Arc::new(FixtureAuthCommand),
            donations: Arc::new(FixtureDonationCommand),
            campaigns: Arc::new(FixtureCampaignQuery),
            campaign_admin: Arc::new(FixtureCampaignCommand),
            comments: Arc::new(FixtureCommentQuery),
            comment_posts: Arc::new(FixtureCommentCommand),
            news: Arc::new(FixtureNewsQuery),
            news_admin: Arc::new(FixtureNewsCommand),
            profile: Arc::new(FixtureProfileQuery),
            profile_edits: Arc::new(FixtureProfileCommand),
            weather: Arc::new(FixtureWeatherQuery),
        }
    }
}
