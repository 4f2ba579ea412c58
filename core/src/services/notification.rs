//! Notification sink interface.
//!
//! The sink is an external collaborator: the workflow hands it events
//! after the state change has been committed. Delivery is best-effort;
//! callers log failures and move on, so this error type never appears
//! in a workflow result.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::events::NotificationEvent;

/// Errors a notification sink can report
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Notification sink is not available")]
    Unavailable,
}

/// Trait implemented by outbound notification sinks
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Deliver a single event
    async fn send(&self, event: NotificationEvent) -> Result<(), NotificationError>;

    /// Provider name used in logs
    fn provider_name(&self) -> &str;
}
