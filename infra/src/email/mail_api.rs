//! HTTP mail-API notification sink.
//!
//! Posts rendered messages to a transactional mail provider. The caller
//! treats every failure as non-fatal; this client only reports them.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use rw_core::domain::events::NotificationEvent;
use rw_core::services::notification::{NotificationError, NotificationService};
use rw_shared::config::NotificationConfig;

use super::message::EmailMessage;

/// Notification sink backed by a transactional mail HTTP API
pub struct MailApiNotifier {
    client: Client,
    config: NotificationConfig,
}

/// Request payload for the mail API
#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    from_address: &'a str,
    from_name: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl MailApiNotifier {
    /// Create a new mail API client from configuration
    pub fn new(config: NotificationConfig) -> Result<Self, NotificationError> {
        if !config.is_configured() {
            return Err(NotificationError::Unavailable);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotificationError::Delivery(format!("client setup failed: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl NotificationService for MailApiNotifier {
    async fn send(&self, event: NotificationEvent) -> Result<(), NotificationError> {
        let message = EmailMessage::render(&event);

        let payload = SendMailRequest {
            from_address: &self.config.from_address,
            from_name: &self.config.from_name,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotificationError::Delivery(format!(
                "mail API returned {}",
                response.status()
            )));
        }

        info!(
            target: "notification",
            provider = "mail_api",
            event = event.kind(),
            "notification delivered"
        );
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "MailApi"
    }
}
