//! Port for idempotency record storage.

use async_trait::async_trait;

use crate::domain::idempotency::{IdempotencyKey, IdempotencyRecord, Mutation};
use crate::domain::user::UserId;

/// Errors raised by idempotency repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdempotencyRepositoryError {
    /// The backing store could not be reached.
    #[error("idempotency store connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("idempotency store query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// Port for storing completed-mutation records.
///
/// Records are scoped to `(key, user, mutation)`; two users reusing the same
/// key never observe each other's responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdempotencyRepository: Send + Sync {
    /// Fetch the record for a key, if the mutation already completed.
    async fn find(
        &self,
        key: IdempotencyKey,
        user_id: UserId,
        mutation: Mutation,
    ) -> Result<Option<IdempotencyRecord>, IdempotencyRepositoryError>;

    /// Store a completed-mutation record.
    async fn store(&self, record: &IdempotencyRecord)
    -> Result<(), IdempotencyRepositoryError>;
}

/// Fixture implementation remembering nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdempotencyRepository;

#[async_trait]
impl IdempotencyRepository for FixtureIdempotencyRepository {
    async fn find(
        &self,
        _key: IdempotencyKey,
        _user_id: UserId,
        _mutation: Mutation,
    ) -> Result<Option<IdempotencyRecord>, IdempotencyRepositoryError> {
        Ok(None)
    }

    async fn store(
        &self,
        _record: &IdempotencyRecord,
    ) -> Result<(), IdempotencyRepositoryError> {
        Ok(())
    }
}
