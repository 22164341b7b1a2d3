//! REST blob store.
//!
//! Uploads objects into a public bucket and returns the bucket's public URL
//! for the object.

use async_trait::async_trait;

use super::client::{RestClient, RestClientError};
use crate::domain::ports::{BlobStore, BlobStoreError};

fn map_error(error: RestClientError) -> BlobStoreError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => BlobStoreError::Connection {
            message: error.to_string(),
        },
        RestClientError::Status { .. } | RestClientError::Decode { .. } => BlobStoreError::Upload {
            message: error.to_string(),
        },
    }
}

/// [`BlobStore`] adapter over the hosted object storage.
#[derive(Debug, Clone)]
pub struct RestBlobStore {
    client: RestClient,
    bucket: String,
}

impl RestBlobStore {
    /// Wrap a configured client targeting one bucket.
    #[must_use]
    pub fn new(client: RestClient, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl BlobStore for RestBlobStore {
    async fn put(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError> {
        let upload_path = format!("storage/v1/object/{}/{path}", self.bucket);
        self.client
            .post_bytes(&upload_path, content_type, bytes)
            .await
            .map_err(map_error)?;
        Ok(format!(
            "{}storage/v1/object/public/{}/{path}",
            self.client.base_url(),
            self.bucket
        ))
    }
}
