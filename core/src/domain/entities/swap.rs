//! Swap entity: a proposed or executed exchange between two members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the optional message attached to a request
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Maximum length of a rejection reason
pub const MAX_REJECTION_REASON_LENGTH: usize = 300;

/// What the requester puts on the table
///
/// A swap offers either one of the requester's items or a points payment,
/// never both and never neither; the enum makes the illegal shapes
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapOffer {
    /// An item owned by the requester
    Item(Uuid),
    /// A points payment, always positive
    Points(i64),
}

impl SwapOffer {
    /// The offered item id, when the offer is an item
    pub fn item_id(&self) -> Option<Uuid> {
        match self {
            SwapOffer::Item(id) => Some(*id),
            SwapOffer::Points(_) => None,
        }
    }

    /// The offered points, when the offer is a payment
    pub fn points(&self) -> Option<i64> {
        match self {
            SwapOffer::Item(_) => None,
            SwapOffer::Points(amount) => Some(*amount),
        }
    }
}

/// Lifecycle state of a swap request
///
/// `Rejected` and `Completed` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl SwapStatus {
    /// Wire form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
        }
    }

    /// Parse a status from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(SwapStatus::Pending),
            "accepted" => Some(SwapStatus::Accepted),
            "rejected" => Some(SwapStatus::Rejected),
            "completed" => Some(SwapStatus::Completed),
            _ => None,
        }
    }

    /// Whether the state admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Rejected | SwapStatus::Completed)
    }
}

/// Swap entity: the transactional record of an exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    /// Unique identifier for the swap
    pub id: Uuid,

    /// User who initiated the request
    pub requester_id: Uuid,

    /// Owner of the requested item at creation time
    pub owner_id: Uuid,

    /// The item the requester wants
    pub requested_item_id: Uuid,

    /// What the requester offers in exchange
    pub offer: SwapOffer,

    /// Lifecycle state
    pub status: SwapStatus,

    /// Optional message from the requester
    pub message: Option<String>,

    /// Reason recorded when the owner rejects
    pub rejection_reason: Option<String>,

    /// Timestamp set when the swap completes
    pub completed_at: Option<DateTime<Utc>>,

    /// Timestamp when the swap was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the swap was last updated
    pub updated_at: DateTime<Utc>,
}

impl Swap {
    /// Creates a new pending swap request
    pub fn new(
        requester_id: Uuid,
        owner_id: Uuid,
        requested_item_id: Uuid,
        offer: SwapOffer,
        message: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            requester_id,
            owner_id,
            requested_item_id,
            offer,
            status: SwapStatus::Pending,
            message,
            rejection_reason: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the swap accepted
    pub fn accept(&mut self) {
        self.status = SwapStatus::Accepted;
        self.updated_at = Utc::now();
    }

    /// Marks the swap rejected with the owner's reason
    pub fn reject(&mut self, reason: String) {
        self.status = SwapStatus::Rejected;
        self.rejection_reason = Some(reason);
        self.updated_at = Utc::now();
    }

    /// Marks the swap completed
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.status = SwapStatus::Completed;
        self.completed_at = Some(at);
        self.updated_at = at;
    }

    /// Whether the swap has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the given user is one of the two parties
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id || self.owner_id == user_id
    }

    /// The offered item id, if the offer is an item
    pub fn offered_item_id(&self) -> Option<Uuid> {
        self.offer.item_id()
    }

    /// The offered points, if the offer is a payment
    pub fn points_offered(&self) -> Option<i64> {
        self.offer.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points_swap() -> Swap {
        Swap::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            SwapOffer::Points(30),
            Some("Would love this for autumn".to_string()),
        )
    }

    #[test]
    fn test_new_swap_is_pending() {
        let swap = points_swap();

        assert_eq!(swap.status, SwapStatus::Pending);
        assert!(!swap.is_terminal());
        assert!(swap.completed_at.is_none());
        assert!(swap.rejection_reason.is_none());
    }

    #[test]
    fn test_offer_accessors() {
        let swap = points_swap();
        assert_eq!(swap.points_offered(), Some(30));
        assert_eq!(swap.offered_item_id(), None);

        let item_id = Uuid::new_v4();
        let item_swap = Swap::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            SwapOffer::Item(item_id),
            None,
        );
        assert_eq!(item_swap.offered_item_id(), Some(item_id));
        assert_eq!(item_swap.points_offered(), None);
    }

    #[test]
    fn test_involves_both_parties() {
        let swap = points_swap();
        assert!(swap.involves(swap.requester_id));
        assert!(swap.involves(swap.owner_id));
        assert!(!swap.involves(Uuid::new_v4()));
    }

    #[test]
    fn test_reject_records_reason() {
        let mut swap = points_swap();
        swap.reject("Looking for an item trade".to_string());

        assert_eq!(swap.status, SwapStatus::Rejected);
        assert!(swap.is_terminal());
        assert_eq!(
            swap.rejection_reason.as_deref(),
            Some("Looking for an item trade")
        );
    }

    #[test]
    fn test_complete_sets_timestamp() {
        let mut swap = points_swap();
        swap.accept();
        let at = Utc::now();
        swap.complete(at);

        assert_eq!(swap.status, SwapStatus::Completed);
        assert_eq!(swap.completed_at, Some(at));
        assert!(swap.is_terminal());
    }

    #[test]
    fn test_terminal_states() {
        assert!(SwapStatus::Rejected.is_terminal());
        assert!(SwapStatus::Completed.is_terminal());
        assert!(!SwapStatus::Pending.is_terminal());
        assert!(!SwapStatus::Accepted.is_terminal());
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            SwapStatus::Pending,
            SwapStatus::Accepted,
            SwapStatus::Rejected,
            SwapStatus::Completed,
        ] {
            assert_eq!(SwapStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SwapStatus::parse("cancelled"), None);
    }
}
