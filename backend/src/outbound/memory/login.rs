//! In-memory login service.
//!
//! Holds plaintext accounts for local development and tests only; production
//! deployments verify credentials through the hosted auth collaborator.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::Credentials;
use crate::domain::ports::{LoginService, LoginServiceError};
use crate::domain::user::UserId;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user_id: UserId,
}

/// In-memory [`LoginService`] implementation.
#[derive(Debug, Default)]
pub struct MemoryLoginService {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryLoginService {
    /// Create a service with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account, returning its user id.
    pub async fn register(&self, email: &str, password: &str) -> UserId {
        let user_id = UserId::random();
        self.accounts.write().await.insert(
            email.to_owned(),
            Account {
                password: password.to_owned(),
                user_id,
            },
        );
        user_id
    }
}

#[async_trait]
impl LoginService for MemoryLoginService {
    async fn verify(&self, credentials: &Credentials) -> Result<UserId, LoginServiceError> {
        let accounts = self.accounts.read().await;
        match accounts.get(credentials.email()) {
            Some(account) if account.password == credentials.password() => Ok(account.user_id),
            _ => Err(LoginServiceError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password.to_owned()).expect("valid credentials")
    }

    #[tokio::test]
    async fn verifies_registered_accounts() {
        let service = MemoryLoginService::new();
        let user_id = service.register("user@example.com", "secret").await;

        let verified = service
            .verify(&credentials("user@example.com", "secret"))
            .await
            .expect("verification succeeds");
        assert_eq!(verified, user_id);
    }

    #[tokio::test]
    async fn rejects_wrong_passwords_and_unknown_accounts() {
        let service = MemoryLoginService::new();
        service.register("user@example.com", "secret").await;

        assert_eq!(
            service
                .verify(&credentials("user@example.com", "wrong"))
                .await,
            Err(LoginServiceError::InvalidCredentials)
        );
        assert_eq!(
            service
                .verify(&credentials("other@example.com", "secret"))
                .await,
            Err(LoginServiceError::InvalidCredentials)
        );
    }
}
