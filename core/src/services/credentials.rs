//! Credential service interface.
//!
//! Identity is an external collaborator: the backend hands a bearer token
//! to the credential service and receives the acting user back. Token
//! issuance, password storage and session management live on the other
//! side of this trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Trait implemented by credential verifiers
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Resolve a bearer token to the acting user
    ///
    /// Fails with `DomainError::Unauthenticated` for missing, malformed,
    /// expired or otherwise unverifiable tokens.
    async fn authenticate(&self, token: &str) -> Result<User, DomainError>;
}

/// Mock credential service mapping fixed tokens to users
pub struct MockCredentialService {
    tokens: Arc<RwLock<HashMap<String, User>>>,
}

impl MockCredentialService {
    /// Create an empty mock service
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a token for a user
    pub async fn grant(&self, token: impl Into<String>, user: User) {
        self.tokens.write().await.insert(token.into(), user);
    }
}

impl Default for MockCredentialService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialService for MockCredentialService {
    async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(DomainError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let service = MockCredentialService::new();
        let result = service.authenticate("nope").await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_granted_token_resolves_user() {
        let service = MockCredentialService::new();
        let user = User::new("Ava".to_string(), "ava@example.com".to_string());
        service.grant("token-1", user.clone()).await;

        let resolved = service.authenticate("token-1").await.unwrap();
        assert_eq!(resolved.id, user.id);
    }
}
