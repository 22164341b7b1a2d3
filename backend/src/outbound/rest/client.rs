//! Shared HTTP client for the hosted store's REST protocol.
//!
//! Owns transport details only: authentication headers, request timeout,
//! HTTP error mapping, and JSON decoding. Table and RPC semantics live in
//! the per-port adapters.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Default request timeout for store calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Longest body prefix included in status errors.
const BODY_PREVIEW_LIMIT: usize = 256;

/// Errors raised by the REST client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestClientError {
    /// The store did not answer within the configured deadline.
    #[error("store request timed out")]
    Timeout,
    /// The store could not be reached.
    #[error("store unreachable: {message}")]
    Network {
        /// Transport-level failure detail.
        message: String,
    },
    /// The store answered with a non-success status.
    #[error("store returned status {status}: {body_preview}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        body_preview: String,
    },
    /// The store's response body could not be decoded.
    #[error("store response malformed: {message}")]
    Decode {
        /// Decoding failure detail.
        message: String,
    },
}

/// Connection settings for the hosted store.
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Base URL of the store's REST endpoint, e.g. `https://x.example.co`.
    pub base_url: Url,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl RestClientConfig {
    /// Settings with the default timeout.
    #[must_use]
    pub fn new(base_url: Url, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client wrapper shared by the REST adapters.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

fn map_transport_error(error: reqwest::Error) -> RestClientError {
    if error.is_timeout() {
        RestClientError::Timeout
    } else {
        RestClientError::Network {
            message: error.to_string(),
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.chars().take(BODY_PREVIEW_LIMIT).collect()
}

impl RestClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: RestClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RestClientError> {
        self.base_url
            .join(path)
            .map_err(|err| RestClientError::Network {
                message: format!("invalid endpoint {path}: {err}"),
            })
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
    }

    async fn read_success(response: reqwest::Response) -> Result<Vec<u8>, RestClientError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(RestClientError::Status {
                status: status.as_u16(),
                body_preview: body_preview(&body),
            })
        }
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RestClientError> {
        serde_json::from_slice(body).map_err(|err| RestClientError::Decode {
            message: err.to_string(),
        })
    }

    /// Fetch rows from a table endpoint.
    pub async fn get_rows<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, RestClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.http.get(url).query(query))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = Self::read_success(response).await?;
        Self::decode(&body)
    }

    /// Insert one row and return its stored representation.
    pub async fn insert_row<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RestClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::read_success(response).await?;
        let mut rows: Vec<T> = Self::decode(&bytes)?;
        rows.pop().ok_or_else(|| RestClientError::Decode {
            message: "insert returned no representation".to_owned(),
        })
    }

    /// Update matching rows and return their stored representations.
    pub async fn patch_rows<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Vec<T>, RestClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.http.patch(url).query(query))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::read_success(response).await?;
        Self::decode(&bytes)
    }

    /// Delete matching rows, returning how many were removed.
    pub async fn delete_rows(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<usize, RestClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.http.delete(url).query(query))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::read_success(response).await?;
        let rows: Vec<serde_json::Value> = Self::decode(&bytes)?;
        Ok(rows.len())
    }

    /// Call a server-side function.
    pub async fn rpc<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        function: &str,
        body: &B,
    ) -> Result<T, RestClientError> {
        let url = self.endpoint(&format!("rest/v1/rpc/{function}"))?;
        let response = self
            .authed(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::read_success(response).await?;
        Self::decode(&bytes)
    }

    /// Issue a raw POST with a binary body. Used by the storage adapter.
    pub async fn post_bytes(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), RestClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.http.post(url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_success(response).await.map(|_| ())
    }

    /// Issue a raw POST with a JSON body against an arbitrary path, without
    /// expecting a table representation. Used by the auth adapter.
    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RestClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::read_success(response).await?;
        Self::decode(&bytes)
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a status error represents a missing resource.
    #[must_use]
    pub fn is_not_found(error: &RestClientError) -> bool {
        matches!(
            error,
            RestClientError::Status { status, .. }
                if *status == StatusCode::NOT_FOUND.as_u16()
        )
    }
}
