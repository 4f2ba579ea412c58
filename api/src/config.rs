//! Application configuration assembled from the environment.

use rw_shared::config::{AuthConfig, DatabaseConfig, NotificationConfig, ServerConfig};

/// Complete runtime configuration for the API process
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub notification: NotificationConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Fails when a required setting (`JWT_SECRET`) is missing; the
    /// process should refuse to start rather than run half-configured.
    pub fn from_env() -> anyhow::Result<Self> {
        let auth = AuthConfig::from_env()
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;

        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            notification: NotificationConfig::from_env(),
            auth,
        })
    }
}
