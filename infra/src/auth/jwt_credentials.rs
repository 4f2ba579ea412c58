//! JWT-backed credential service.
//!
//! Verification-only adapter: tokens are issued elsewhere; this service
//! checks the HS256 signature and expiry, then resolves the subject to
//! a user record. Any verification failure collapses to
//! `Unauthenticated` so the API never leaks why a token was refused.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use rw_core::domain::entities::user::User;
use rw_core::errors::DomainError;
use rw_core::repositories::UserRepository;
use rw_core::services::credentials::CredentialService;
use rw_shared::config::AuthConfig;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued-at, seconds since epoch
    #[serde(default)]
    pub iat: i64,
}

/// Credential service verifying HS256 bearer tokens
pub struct JwtCredentialService<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    decoding_key: DecodingKey,
}

impl<U> JwtCredentialService<U>
where
    U: UserRepository,
{
    /// Create a new credential service from configuration
    pub fn new(users: Arc<U>, config: &AuthConfig) -> Self {
        Self {
            users,
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Unauthenticated)
    }
}

#[async_trait]
impl<U> CredentialService for JwtCredentialService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.decode_claims(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| DomainError::Unauthenticated)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use rw_core::repositories::MockUserRepository;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
        }
    }

    fn token_for(sub: &str, secret: &str, expires_in: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + expires_in,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let user = User::new("Ava".to_string(), "ava@example.com".to_string());
        let users = Arc::new(MockUserRepository::with_users(vec![user.clone()]).await);
        let service = JwtCredentialService::new(users, &config());

        let token = token_for(&user.id.to_string(), "test-secret", 3600);
        let resolved = service.authenticate(&token).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let user = User::new("Ava".to_string(), "ava@example.com".to_string());
        let users = Arc::new(MockUserRepository::with_users(vec![user.clone()]).await);
        let service = JwtCredentialService::new(users, &config());

        let token = token_for(&user.id.to_string(), "test-secret", -3600);
        assert!(matches!(
            service.authenticate(&token).await,
            Err(DomainError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let user = User::new("Ava".to_string(), "ava@example.com".to_string());
        let users = Arc::new(MockUserRepository::with_users(vec![user.clone()]).await);
        let service = JwtCredentialService::new(users, &config());

        let token = token_for(&user.id.to_string(), "other-secret", 3600);
        assert!(matches!(
            service.authenticate(&token).await,
            Err(DomainError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_rejected() {
        let users = Arc::new(MockUserRepository::new());
        let service = JwtCredentialService::new(users, &config());

        let token = token_for(&Uuid::new_v4().to_string(), "test-secret", 3600);
        assert!(matches!(
            service.authenticate(&token).await,
            Err(DomainError::Unauthenticated)
        ));
    }
}
