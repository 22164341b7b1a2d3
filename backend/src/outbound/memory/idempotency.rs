//! In-memory idempotency repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::idempotency::{IdempotencyKey, IdempotencyRecord, Mutation};
use crate::domain::ports::{IdempotencyRepository, IdempotencyRepositoryError};
use crate::domain::user::UserId;

type RecordKey = (IdempotencyKey, UserId, Mutation);

/// In-memory [`IdempotencyRepository`] implementation.
#[derive(Debug, Default)]
pub struct MemoryIdempotencyRepository {
    records: RwLock<HashMap<RecordKey, IdempotencyRecord>>,
}

impl MemoryIdempotencyRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdempotencyRepository for MemoryIdempotencyRepository {
    async fn find(
        &self,
        key: IdempotencyKey,
        user_id: UserId,
        mutation: Mutation,
    ) -> Result<Option<IdempotencyRecord>, IdempotencyRepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(&(key, user_id, mutation))
            .cloned())
    }

    async fn store(
        &self,
        record: &IdempotencyRecord,
    ) -> Result<(), IdempotencyRepositoryError> {
        self.records.write().await.insert(
            (record.key, record.user_id, record.mutation),
            record.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn records_are_scoped_to_the_user() {
        let repo = MemoryIdempotencyRepository::new();
        let key = IdempotencyKey::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid key");
        let owner = UserId::random();
        let other = UserId::random();

        repo.store(&IdempotencyRecord {
            key,
            user_id: owner,
            mutation: Mutation::SubmitDonation,
            payload_fingerprint: "abc".to_owned(),
            response: json!({ "ok": true }),
            created_at: Utc::now(),
        })
        .await
        .expect("store succeeds");

        let found = repo
            .find(key, owner, Mutation::SubmitDonation)
            .await
            .expect("find succeeds");
        assert!(found.is_some());

        let not_found = repo
            .find(key, other, Mutation::SubmitDonation)
            .await
            .expect("find succeeds");
        assert!(not_found.is_none());
    }
}
