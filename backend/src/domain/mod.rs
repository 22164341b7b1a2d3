//! Domain model, services, and ports.

pub mod auth;
mod auth_service;
pub mod campaign;
pub mod comment;
mod comment_service;
pub mod donation;
mod donation_service;
mod error;
pub mod idempotency;
pub mod money;
pub mod news;
mod news_service;
pub mod ports;
mod profile_service;
pub mod user;
pub mod weather;
mod weather_service;

pub use auth::{AuthState, Credentials, CredentialsError, Identity};
pub use auth_service::AuthService;
pub use campaign::{
    Campaign, CampaignDraft, CampaignId, CampaignProgress, CampaignValidationError,
};
pub use comment::{
    Comment, CommentId, CommentPosted, CommentValidationError, PostRef, PostType,
    validate_comment_content,
};
pub use comment_service::CommentService;
pub use donation::{Donation, DonationId, DonorTotal, LeaderboardEntry, NewDonation};
pub use donation_service::DonationService;
pub use error::{Error, ErrorCode};
pub use idempotency::{IdempotencyKey, IdempotencyRecord, Mutation, payload_fingerprint};
pub use money::{Amount, AmountError};
pub use news_service::NewsService;
pub use news::{NewsDraft, NewsPost, NewsPostId, NewsValidationError};
pub use profile_service::ProfileService;
pub use user::{Profile, UserId, UserValidationError, validate_display_name};
pub use weather::{City, ClassifiedDay, DailyForecast, DayConditions, is_severe_weather};
pub use weather_service::WeatherService;
