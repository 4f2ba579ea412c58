//! Mock email notification sink.
//!
//! Logs rendered messages instead of delivering them. Used in
//! development (when no mail API is configured) and in tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use rw_core::domain::events::NotificationEvent;
use rw_core::services::notification::{NotificationError, NotificationService};

use super::message::EmailMessage;

/// Mock notification sink for development and testing
#[derive(Clone)]
pub struct MockEmailNotifier {
    /// Counter for tracking the number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockEmailNotifier {
    /// Create a new mock sink
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock sink that fails every delivery
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockEmailNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for MockEmailNotifier {
    async fn send(&self, event: NotificationEvent) -> Result<(), NotificationError> {
        if self.simulate_failure {
            warn!(
                target: "notification",
                provider = "mock",
                event = event.kind(),
                "simulating delivery failure"
            );
            return Err(NotificationError::Delivery(
                "simulated delivery failure".to_string(),
            ));
        }

        let message = EmailMessage::render(&event);
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "notification",
            provider = "mock",
            event = event.kind(),
            to = %message.to,
            subject = %message.subject,
            count,
            "notification delivered (mock)"
        );

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> NotificationEvent {
        NotificationEvent::ItemApproved {
            recipient_email: "ava@example.com".to_string(),
            item_title: "Silk scarf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_counts_deliveries() {
        let notifier = MockEmailNotifier::new();

        for expected in 1..=3 {
            notifier.send(sample_event()).await.unwrap();
            assert_eq!(notifier.message_count(), expected);
        }
    }

    #[tokio::test]
    async fn test_mock_simulated_failure() {
        let notifier = MockEmailNotifier::failing();
        let result = notifier.send(sample_event()).await;

        assert!(result.is_err());
        assert_eq!(notifier.message_count(), 0);
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(MockEmailNotifier::new().provider_name(), "Mock");
    }
}
