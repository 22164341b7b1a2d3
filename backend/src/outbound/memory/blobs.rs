//! In-memory blob store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{BlobStore, BlobStoreError};

#[derive(Debug, Clone)]
struct StoredBlob {
    content_type: String,
    bytes: Vec<u8>,
}

/// In-memory [`BlobStore`] implementation serving `memory://` URLs.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored blob's content type and bytes. For tests.
    pub async fn get(&self, path: &str) -> Option<(String, Vec<u8>)> {
        self.blobs
            .read()
            .await
            .get(path)
            .map(|blob| (blob.content_type.clone(), blob.bytes.clone()))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError> {
        self.blobs.write().await.insert(
            path.to_owned(),
            StoredBlob {
                content_type: content_type.to_owned(),
                bytes,
            },
        );
        Ok(format!("memory://{path}"))
    }
}
