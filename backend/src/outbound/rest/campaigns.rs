//! REST campaign repository.

use async_trait::async_trait;
use serde_json::json;

use super::client::{RestClient, RestClientError};
use super::rows::{CampaignRow, CampaignWriteRow};
use crate::domain::campaign::{Campaign, CampaignDraft, CampaignId};
use crate::domain::ports::{CampaignRepository, CampaignRepositoryError};

const TABLE: &str = "rest/v1/campaigns";
/// Server-side function performing the atomic total increment.
const INCREMENT_FN: &str = "increment_campaign_total";

fn map_error(error: RestClientError) -> CampaignRepositoryError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => {
            CampaignRepositoryError::Connection {
                message: error.to_string(),
            }
        }
        RestClientError::Status { .. } | RestClientError::Decode { .. } => {
            CampaignRepositoryError::Query {
                message: error.to_string(),
            }
        }
    }
}

fn decode_row(row: CampaignRow) -> Result<Campaign, CampaignRepositoryError> {
    row.into_domain()
        .map_err(|message| CampaignRepositoryError::Query { message })
}

/// [`CampaignRepository`] adapter over the hosted store.
#[derive(Debug, Clone)]
pub struct RestCampaignRepository {
    client: RestClient,
}

impl RestCampaignRepository {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CampaignRepository for RestCampaignRepository {
    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        let rows: Vec<CampaignRow> = self
            .client
            .get_rows(TABLE, &[("select", "*"), ("order", "created_at.desc,id.desc")])
            .await
            .map_err(map_error)?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        let filter = format!("eq.{id}");
        let mut rows: Vec<CampaignRow> = self
            .client
            .get_rows(TABLE, &[("select", "*"), ("id", &filter)])
            .await
            .map_err(map_error)?;
        rows.pop().map(decode_row).transpose()
    }

    async fn create(&self, draft: &CampaignDraft) -> Result<Campaign, CampaignRepositoryError> {
        let row: CampaignRow = self
            .client
            .insert_row(TABLE, &CampaignWriteRow::from_draft(draft))
            .await
            .map_err(map_error)?;
        decode_row(row)
    }

    async fn update(
        &self,
        id: CampaignId,
        draft: &CampaignDraft,
    ) -> Result<Campaign, CampaignRepositoryError> {
        let filter = format!("eq.{id}");
        let mut rows: Vec<CampaignRow> = self
            .client
            .patch_rows(TABLE, &[("id", &filter)], &CampaignWriteRow::from_draft(draft))
            .await
            .map_err(map_error)?;
        match rows.pop() {
            Some(row) => decode_row(row),
            None => Err(CampaignRepositoryError::NotFound { id }),
        }
    }

    async fn delete(&self, id: CampaignId) -> Result<(), CampaignRepositoryError> {
        let filter = format!("eq.{id}");
        let removed = self
            .client
            .delete_rows(TABLE, &[("id", &filter)])
            .await
            .map_err(map_error)?;
        if removed == 0 {
            Err(CampaignRepositoryError::NotFound { id })
        } else {
            Ok(())
        }
    }

    async fn increment_current_amount(
        &self,
        id: CampaignId,
        amount_minor: i64,
    ) -> Result<i64, CampaignRepositoryError> {
        // The function adds to current_amount and returns the new value in a
        // single statement; it returns null for an unknown campaign.
        let new_total: Option<i64> = self
            .client
            .rpc(
                INCREMENT_FN,
                &json!({
                    "p_campaign_id": id,
                    "p_amount": amount_minor,
                }),
            )
            .await
            .map_err(map_error)?;
        new_total.ok_or(CampaignRepositoryError::NotFound { id })
    }
}
