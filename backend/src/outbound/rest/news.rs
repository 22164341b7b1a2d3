//! REST news repository.

use async_trait::async_trait;

use super::client::{RestClient, RestClientError};
use super::rows::{NewsRow, NewsWriteRow};
use crate::domain::news::{NewsDraft, NewsPost, NewsPostId};
use crate::domain::ports::{NewsRepository, NewsRepositoryError};

const TABLE: &str = "rest/v1/news_posts";

fn map_error(error: RestClientError) -> NewsRepositoryError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => {
            NewsRepositoryError::Connection {
                message: error.to_string(),
            }
        }
        RestClientError::Status { .. } | RestClientError::Decode { .. } => {
            NewsRepositoryError::Query {
                message: error.to_string(),
            }
        }
    }
}

/// [`NewsRepository`] adapter over the hosted store.
#[derive(Debug, Clone)]
pub struct RestNewsRepository {
    client: RestClient,
}

impl RestNewsRepository {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NewsRepository for RestNewsRepository {
    async fn list(&self) -> Result<Vec<NewsPost>, NewsRepositoryError> {
        let rows: Vec<NewsRow> = self
            .client
            .get_rows(TABLE, &[("select", "*"), ("order", "created_at.desc,id.desc")])
            .await
            .map_err(map_error)?;
        Ok(rows.into_iter().map(NewsRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: NewsPostId) -> Result<Option<NewsPost>, NewsRepositoryError> {
        let filter = format!("eq.{id}");
        let mut rows: Vec<NewsRow> = self
            .client
            .get_rows(TABLE, &[("select", "*"), ("id", &filter)])
            .await
            .map_err(map_error)?;
        Ok(rows.pop().map(NewsRow::into_domain))
    }

    async fn create(&self, draft: &NewsDraft) -> Result<NewsPost, NewsRepositoryError> {
        let row: NewsRow = self
            .client
            .insert_row(TABLE, &NewsWriteRow::from_draft(draft))
            .await
            .map_err(map_error)?;
        Ok(row.into_domain())
    }

    async fn update(
        &self,
        id: NewsPostId,
        draft: &NewsDraft,
    ) -> Result<NewsPost, NewsRepositoryError> {
        let filter = format!("eq.{id}");
        let mut rows: Vec<NewsRow> = self
            .client
            .patch_rows(TABLE, &[("id", &filter)], &NewsWriteRow::from_draft(draft))
            .await
            .map_err(map_error)?;
        rows.pop()
            .map(NewsRow::into_domain)
            .ok_or(NewsRepositoryError::NotFound { id })
    }

    async fn delete(&self, id: NewsPostId) -> Result<(), NewsRepositoryError> {
        let filter = format!("eq.{id}");
        let removed = self
            .client
            .delete_rows(TABLE, &[("id", &filter)])
            .await
            .map_err(map_error)?;
        if removed == 0 {
            Err(NewsRepositoryError::NotFound { id })
        } else {
            Ok(())
        }
    }
}
