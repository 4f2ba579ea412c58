//! Notification (email) sink configuration

use serde::{Deserialize, Serialize};

/// Configuration for the outbound email notification sink
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Mail API endpoint URL
    pub api_url: String,

    /// Mail API key
    pub api_key: String,

    /// Sender address shown on outbound mail
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            timeout_secs: default_timeout(),
        }
    }
}

impl NotificationConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("MAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or(defaults.api_key),
            from_address: std::env::var("MAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or(defaults.from_name),
            timeout_secs: defaults.timeout_secs,
        }
    }

    /// Whether the sink is configured to deliver real mail
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}

fn default_from_address() -> String {
    String::from("no-reply@rewear.app")
}

fn default_from_name() -> String {
    String::from("ReWear Platform")
}

fn default_timeout() -> u64 {
    10
}
