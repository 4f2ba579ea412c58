//! Server configuration module

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,

    /// Comma-separated list of allowed CORS origins ("*" for any)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
            keep_alive: default_keep_alive(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS` and
    /// `CORS_ALLOWED_ORIGINS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            workers: std::env::var("SERVER_WORKERS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(defaults.workers),
            keep_alive: defaults.keep_alive,
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.allowed_origins),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Split the configured origins into individual entries
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.origins().iter().any(|o| o == "*")
    }
}

fn default_keep_alive() -> u64 {
    75
}

fn default_allowed_origins() -> String {
    String::from("*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_origins_split_and_trim() {
        let mut config = ServerConfig::default();
        config.allowed_origins = "http://localhost:5173, https://rewear.app".to_string();
        assert_eq!(
            config.origins(),
            vec!["http://localhost:5173", "https://rewear.app"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_wildcard_origin() {
        let config = ServerConfig::default();
        assert!(config.allows_any_origin());
    }
}
