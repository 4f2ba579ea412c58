//! Email message rendering for workflow events.

use rw_core::domain::events::NotificationEvent;

/// A rendered outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    /// Render the email for a workflow event
    pub fn render(event: &NotificationEvent) -> Self {
        let to = event.recipient().to_string();
        match event {
            NotificationEvent::SwapRequested {
                requester_name,
                item_title,
                ..
            } => Self {
                to,
                subject: "New Swap Request".to_string(),
                text: format!(
                    "{} has requested to swap for your item \"{}\". \
                     Check your dashboard to respond.",
                    requester_name, item_title
                ),
            },
            NotificationEvent::SwapAccepted {
                owner_name,
                item_title,
                ..
            } => Self {
                to,
                subject: "Swap Request Accepted!".to_string(),
                text: format!(
                    "Great news! {} has accepted your swap request for \"{}\".",
                    owner_name, item_title
                ),
            },
            NotificationEvent::SwapRejected {
                owner_name,
                item_title,
                reason,
                ..
            } => Self {
                to,
                subject: "Swap Request Update".to_string(),
                text: format!(
                    "{} has declined your swap request for \"{}\". Reason: {}",
                    owner_name, item_title, reason
                ),
            },
            NotificationEvent::ItemApproved { item_title, .. } => Self {
                to,
                subject: "Your Item Has Been Approved!".to_string(),
                text: format!(
                    "Your item \"{}\" has been approved and is now live on the platform.",
                    item_title
                ),
            },
            NotificationEvent::ItemRejected {
                item_title, reason, ..
            } => Self {
                to,
                subject: "Item Listing Update".to_string(),
                text: format!(
                    "Your item \"{}\" could not be approved. Reason: {}",
                    item_title, reason
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_requested_rendering() {
        let event = NotificationEvent::SwapRequested {
            recipient_email: "owner@example.com".to_string(),
            requester_name: "Riley".to_string(),
            item_title: "Linen shirt".to_string(),
        };
        let message = EmailMessage::render(&event);

        assert_eq!(message.to, "owner@example.com");
        assert_eq!(message.subject, "New Swap Request");
        assert!(message.text.contains("Riley"));
        assert!(message.text.contains("Linen shirt"));
    }

    #[test]
    fn test_rejection_includes_reason() {
        let event = NotificationEvent::SwapRejected {
            recipient_email: "riley@example.com".to_string(),
            owner_name: "Morgan".to_string(),
            item_title: "Linen shirt".to_string(),
            reason: "Looking for a trade".to_string(),
        };
        let message = EmailMessage::render(&event);

        assert!(message.text.contains("Reason: Looking for a trade"));
    }
}
