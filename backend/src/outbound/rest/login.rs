//! REST login service.
//!
//! Exchanges an email and password for a token at the auth collaborator's
//! password-grant endpoint. Only the user id is retained; tokens are not
//! stored because sessions are cookie-based.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::client::{RestClient, RestClientError};
use crate::domain::auth::Credentials;
use crate::domain::ports::{LoginService, LoginServiceError};
use crate::domain::user::UserId;

const TOKEN_PATH: &str = "auth/v1/token?grant_type=password";

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: UserId,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

fn map_error(error: RestClientError) -> LoginServiceError {
    match error {
        // The auth endpoint answers 400 for bad credentials.
        RestClientError::Status { status, .. } if status == 400 || status == 401 => {
            LoginServiceError::InvalidCredentials
        }
        other => LoginServiceError::Unavailable {
            message: other.to_string(),
        },
    }
}

/// [`LoginService`] adapter over the hosted auth collaborator.
#[derive(Debug, Clone)]
pub struct RestLoginService {
    client: RestClient,
}

impl RestLoginService {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoginService for RestLoginService {
    async fn verify(&self, credentials: &Credentials) -> Result<UserId, LoginServiceError> {
        let response: TokenResponse = self
            .client
            .post_json(
                TOKEN_PATH,
                &json!({
                    "email": credentials.email(),
                    "password": credentials.password(),
                }),
            )
            .await
            .map_err(map_error)?;
        Ok(response.user.id)
    }
}
