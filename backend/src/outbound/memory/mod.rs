//! In-memory adapters.
//!
//! Used by tests and for running the server without external services. Each
//! adapter guards its state with a `tokio::sync::RwLock`; the campaign total
//! increment performs its read-modify-write under the write lock, so it is
//! atomic with respect to other increments.

mod blobs;
mod campaigns;
mod comments;
mod donations;
mod idempotency;
mod login;
mod news;
mod profiles;

pub use blobs::MemoryBlobStore;
pub use campaigns::MemoryCampaignRepository;
pub use comments::MemoryCommentRepository;
pub use donations::MemoryDonationLedger;
pub use idempotency::MemoryIdempotencyRepository;
pub use login::MemoryLoginService;
pub use news::MemoryNewsRepository;
pub use profiles::MemoryProfileStore;
