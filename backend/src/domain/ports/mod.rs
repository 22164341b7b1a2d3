//! Domain ports and supporting types for the hexagonal boundary.

mod auth_command;
mod blob_store;
mod campaign_command;
mod campaign_query;
mod campaign_repository;
mod comment_channel;
mod comment_command;
mod comment_query;
mod comment_repository;
mod donation_command;
mod donation_ledger;
mod idempotency_repository;
mod login_service;
mod news_command;
mod news_query;
mod news_repository;
mod profile_command;
mod profile_query;
mod profile_store;
mod weather_query;
mod weather_source;

#[cfg(test)]
pub use auth_command::MockAuthCommand;
pub use auth_command::{AuthCommand, FixtureAuthCommand};
#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError, FixtureBlobStore};
#[cfg(test)]
pub use campaign_command::MockCampaignCommand;
pub use campaign_command::{CampaignCommand, CampaignWriteRequest, FixtureCampaignCommand};
#[cfg(test)]
pub use campaign_query::MockCampaignQuery;
pub use campaign_query::{CampaignQuery, FixtureCampaignQuery};
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
pub use campaign_repository::{
    CampaignRepository, CampaignRepositoryError, FixtureCampaignRepository,
};
#[cfg(test)]
pub use comment_channel::MockCommentChannel;
pub use comment_channel::{
    CommentChannel, CommentChannelError, CommentSubscription, FixtureCommentChannel,
};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{CommentCommand, FixtureCommentCommand, PostCommentRequest};
#[cfg(test)]
pub use comment_query::MockCommentQuery;
pub use comment_query::{CommentQuery, FixtureCommentQuery};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{
    CommentRepository, CommentRepositoryError, FixtureCommentRepository, NewComment,
};
#[cfg(test)]
pub use donation_command::MockDonationCommand;
pub use donation_command::{
    DonationCommand, FixtureDonationCommand, SubmitDonationRequest, SubmitDonationResponse,
};
#[cfg(test)]
pub use donation_ledger::MockDonationLedger;
pub use donation_ledger::{DonationLedger, DonationLedgerError, FixtureDonationLedger};
#[cfg(test)]
pub use idempotency_repository::MockIdempotencyRepository;
pub use idempotency_repository::{
    FixtureIdempotencyRepository, IdempotencyRepository, IdempotencyRepositoryError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService, LoginServiceError};
#[cfg(test)]
pub use news_command::MockNewsCommand;
pub use news_command::{FixtureNewsCommand, NewsCommand, NewsWriteRequest};
#[cfg(test)]
pub use news_query::MockNewsQuery;
pub use news_query::{FixtureNewsQuery, NewsQuery};
#[cfg(test)]
pub use news_repository::MockNewsRepository;
pub use news_repository::{FixtureNewsRepository, NewsRepository, NewsRepositoryError};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{AvatarUpload, FixtureProfileCommand, ProfileCommand};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{FixtureProfileQuery, ProfileQuery};
#[cfg(test)]
pub use profile_store::MockProfileStore;
pub use profile_store::{FixtureProfileStore, ProfileStore, ProfileStoreError};
#[cfg(test)]
pub use weather_query::MockWeatherQuery;
pub use weather_query::{FixtureWeatherQuery, WeatherQuery};
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{FixtureWeatherSource, WeatherSource, WeatherSourceError};
