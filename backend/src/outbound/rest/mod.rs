//! REST adapters for the hosted data store.
//!
//! These adapters speak a PostgREST-style protocol: table endpoints with
//! query-string filters, `Prefer: return=representation` for writes, and
//! `/rpc/` endpoints for server-side functions. The campaign total increment
//! is one such function, so the add happens inside the store in a single
//! statement.

mod campaigns;
mod client;
mod comments;
mod donations;
mod idempotency;
mod login;
mod news;
mod profiles;
mod rows;
mod storage;

pub use campaigns::RestCampaignRepository;
pub use client::{RestClient, RestClientConfig, RestClientError};
pub use comments::RestCommentRepository;
pub use donations::RestDonationLedger;
pub use idempotency::RestIdempotencyRepository;
pub use login::RestLoginService;
pub use news::RestNewsRepository;
pub use profiles::RestProfileStore;
pub use storage::RestBlobStore;
