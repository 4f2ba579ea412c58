//! Domain events emitted by the workflow services.
//!
//! Events are handed to the notification sink after the state change that
//! produced them has been committed; delivery is best-effort and failures
//! never flow back into the workflow.

use serde::{Deserialize, Serialize};

/// A workflow event destined for the notification sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A swap request was created against the recipient's item
    SwapRequested {
        recipient_email: String,
        requester_name: String,
        item_title: String,
    },
    /// The recipient's swap request was accepted
    SwapAccepted {
        recipient_email: String,
        owner_name: String,
        item_title: String,
    },
    /// The recipient's swap request was rejected
    SwapRejected {
        recipient_email: String,
        owner_name: String,
        item_title: String,
        reason: String,
    },
    /// The recipient's listing passed moderation
    ItemApproved {
        recipient_email: String,
        item_title: String,
    },
    /// The recipient's listing was rejected by moderation
    ItemRejected {
        recipient_email: String,
        item_title: String,
        reason: String,
    },
}

impl NotificationEvent {
    /// The address the event should be delivered to
    pub fn recipient(&self) -> &str {
        match self {
            NotificationEvent::SwapRequested {
                recipient_email, ..
            }
            | NotificationEvent::SwapAccepted {
                recipient_email, ..
            }
            | NotificationEvent::SwapRejected {
                recipient_email, ..
            }
            | NotificationEvent::ItemApproved {
                recipient_email, ..
            }
            | NotificationEvent::ItemRejected {
                recipient_email, ..
            } => recipient_email,
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::SwapRequested { .. } => "swap_requested",
            NotificationEvent::SwapAccepted { .. } => "swap_accepted",
            NotificationEvent::SwapRejected { .. } => "swap_rejected",
            NotificationEvent::ItemApproved { .. } => "item_approved",
            NotificationEvent::ItemRejected { .. } => "item_rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_extraction() {
        let event = NotificationEvent::SwapRequested {
            recipient_email: "owner@example.com".to_string(),
            requester_name: "Ava".to_string(),
            item_title: "Denim jacket".to_string(),
        };

        assert_eq!(event.recipient(), "owner@example.com");
        assert_eq!(event.kind(), "swap_requested");
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = NotificationEvent::ItemApproved {
            recipient_email: "ava@example.com".to_string(),
            item_title: "Silk scarf".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "item_approved");
    }
}
