//! Swap repository trait defining the interface for workflow persistence.
//!
//! The single mutation primitive is `transition`: a conditional update
//! that moves a swap out of an expected state. Racing callers serialize
//! at the store; exactly one observes the expected state and wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::swap::{Swap, SwapStatus};
use crate::errors::DomainError;

/// A conditional state transition applied to a swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapTransition {
    /// Target status
    pub status: SwapStatus,
    /// Reason stored when transitioning to Rejected
    pub rejection_reason: Option<String>,
    /// Completion timestamp stored when transitioning to Completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl SwapTransition {
    /// Transition to Accepted
    pub fn accepted() -> Self {
        Self {
            status: SwapStatus::Accepted,
            rejection_reason: None,
            completed_at: None,
        }
    }

    /// Transition to Rejected, recording the owner's reason
    pub fn rejected(reason: String) -> Self {
        Self {
            status: SwapStatus::Rejected,
            rejection_reason: Some(reason),
            completed_at: None,
        }
    }

    /// Transition to Completed at the given instant
    pub fn completed(at: DateTime<Utc>) -> Self {
        Self {
            status: SwapStatus::Completed,
            rejection_reason: None,
            completed_at: Some(at),
        }
    }

    /// Compensating transition back to Pending
    ///
    /// Used when the points transfer fails after an accept won the race;
    /// the swap returns to the retry-or-reject state.
    pub fn back_to_pending() -> Self {
        Self {
            status: SwapStatus::Pending,
            rejection_reason: None,
            completed_at: None,
        }
    }
}

/// Repository trait for Swap entity persistence operations
#[async_trait]
pub trait SwapRepository: Send + Sync {
    /// Find a swap by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Swap>, DomainError>;

    /// Persist a new swap request
    async fn create(&self, swap: Swap) -> Result<Swap, DomainError>;

    /// List swaps where the user is requester or owner, newest first
    async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<Swap>, u64), DomainError>;

    /// Whether the requester already has a pending request for the item
    async fn exists_pending(
        &self,
        requester_id: Uuid,
        requested_item_id: Uuid,
    ) -> Result<bool, DomainError>;

    /// Conditionally transition a swap out of `expected`
    ///
    /// Applies `transition` only when the swap's current status equals
    /// `expected` (`UPDATE .. WHERE id = ? AND status = ?`). Returns the
    /// updated swap, or `Ok(None)` when the swap exists but was not in
    /// the expected state. A missing swap is `NotFound`.
    async fn transition(
        &self,
        id: Uuid,
        expected: SwapStatus,
        transition: SwapTransition,
    ) -> Result<Option<Swap>, DomainError>;

    /// Count all swaps
    async fn count(&self) -> Result<u64, DomainError>;

    /// Count swaps in a given status
    async fn count_by_status(&self, status: SwapStatus) -> Result<u64, DomainError>;
}
