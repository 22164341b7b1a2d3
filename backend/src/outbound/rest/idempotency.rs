//! REST idempotency repository.

use async_trait::async_trait;

use super::client::{RestClient, RestClientError};
use super::rows::{IdempotencyRow, IdempotencyWriteRow};
use crate::domain::idempotency::{IdempotencyKey, IdempotencyRecord, Mutation};
use crate::domain::ports::{IdempotencyRepository, IdempotencyRepositoryError};
use crate::domain::user::UserId;

const TABLE: &str = "rest/v1/idempotency_records";

fn map_error(error: RestClientError) -> IdempotencyRepositoryError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => {
            IdempotencyRepositoryError::Connection {
                message: error.to_string(),
            }
        }
        RestClientError::Status { .. } | RestClientError::Decode { .. } => {
            IdempotencyRepositoryError::Query {
                message: error.to_string(),
            }
        }
    }
}

/// [`IdempotencyRepository`] adapter over the hosted store.
#[derive(Debug, Clone)]
pub struct RestIdempotencyRepository {
    client: RestClient,
}

impl RestIdempotencyRepository {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdempotencyRepository for RestIdempotencyRepository {
    async fn find(
        &self,
        key: IdempotencyKey,
        user_id: UserId,
        mutation: Mutation,
    ) -> Result<Option<IdempotencyRecord>, IdempotencyRepositoryError> {
        let key_filter = format!("eq.{key}");
        let user_filter = format!("eq.{user_id}");
        let mutation_filter = format!("eq.{mutation}");
        let mut rows: Vec<IdempotencyRow> = self
            .client
            .get_rows(
                TABLE,
                &[
                    ("select", "*"),
                    ("key", &key_filter),
                    ("user_id", &user_filter),
                    ("mutation", &mutation_filter),
                ],
            )
            .await
            .map_err(map_error)?;
        Ok(rows.pop().map(IdempotencyRow::into_domain))
    }

    async fn store(
        &self,
        record: &IdempotencyRecord,
    ) -> Result<(), IdempotencyRepositoryError> {
        let _: IdempotencyRow = self
            .client
            .insert_row(
                TABLE,
                &IdempotencyWriteRow {
                    key: record.key,
                    user_id: record.user_id,
                    mutation: record.mutation,
                    payload_fingerprint: &record.payload_fingerprint,
                    response: &record.response,
                    created_at: record.created_at,
                },
            )
            .await
            .map_err(map_error)?;
        Ok(())
    }
}
