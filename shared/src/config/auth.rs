//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Configuration for bearer-token verification
///
/// Token issuance lives in the external credential service; the backend
/// only verifies signatures, so the secret is the single shared setting.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret used to verify access tokens
    pub jwt_secret: String,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// Returns `None` when `JWT_SECRET` is unset; the server refuses to
    /// start without it rather than falling back to a known value.
    pub fn from_env() -> Option<Self> {
        std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|jwt_secret| Self { jwt_secret })
    }
}
