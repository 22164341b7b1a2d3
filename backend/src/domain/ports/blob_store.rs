//! Port for public blob storage, used for avatar uploads.

use async_trait::async_trait;

/// Errors raised by blob store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobStoreError {
    /// The backing store could not be reached.
    #[error("blob store connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// The upload was rejected or failed mid-flight.
    #[error("blob upload failed: {message}")]
    Upload {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// Port for storing publicly served blobs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under `path`, replacing any existing object, and return
    /// its public URL.
    async fn put(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError>;
}

/// Fixture implementation discarding uploads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBlobStore;

#[async_trait]
impl BlobStore for FixtureBlobStore {
    async fn put(
        &self,
        path: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError> {
        Ok(format!("fixture://{path}"))
    }
}
