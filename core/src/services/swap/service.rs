//! Swap workflow engine.
//!
//! The state machine at the heart of the platform: pending → accepted →
//! completed, with rejection as the other terminal branch. Acceptance is
//! the settlement point — the points transfer happens there, and the
//! items move out of `Available` there. Every transition is a conditional
//! update against the store, so concurrent callers serialize without any
//! in-process lock being held across I/O.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::item::ItemStatus;
use crate::domain::entities::swap::{
    Swap, SwapOffer, SwapStatus, MAX_MESSAGE_LENGTH, MAX_REJECTION_REASON_LENGTH,
};
use crate::domain::entities::user::User;
use crate::domain::events::NotificationEvent;
use crate::errors::{DomainError, DomainResult, SwapError};
use crate::repositories::{ItemRepository, SwapRepository, SwapTransition, UserRepository};
use crate::services::catalog::CatalogService;
use crate::services::ledger::PointsLedger;
use crate::services::notification::NotificationService;

/// Input for creating a swap request
#[derive(Debug, Clone)]
pub struct CreateSwapInput {
    /// The item the requester wants
    pub requested_item_id: Uuid,
    /// What the requester offers in exchange
    pub offer: SwapOffer,
    /// Optional message shown to the owner
    pub message: Option<String>,
}

/// Swap workflow engine
///
/// Orchestrates the swap lifecycle over the swap, item and user stores,
/// settling points through the ledger and locking items through the
/// catalog. Notifications are fired after each committed transition and
/// never affect the outcome.
pub struct SwapService<S, I, U, N>
where
    S: SwapRepository,
    I: ItemRepository,
    U: UserRepository,
    N: NotificationService + ?Sized,
{
    /// Swap store
    swaps: Arc<S>,
    /// Item store, used directly for the completion transition
    items: Arc<I>,
    /// User store, used for notification recipient lookups
    users: Arc<U>,
    /// Availability state machine over the item store
    catalog: CatalogService<I>,
    /// Points ledger over the user store
    ledger: PointsLedger<U>,
    /// Best-effort notification sink
    notifier: Arc<N>,
}

impl<S, I, U, N> SwapService<S, I, U, N>
where
    S: SwapRepository,
    I: ItemRepository,
    U: UserRepository,
    N: NotificationService + ?Sized,
{
    /// Create a new swap workflow engine
    pub fn new(swaps: Arc<S>, items: Arc<I>, users: Arc<U>, notifier: Arc<N>) -> Self {
        Self {
            swaps,
            catalog: CatalogService::new(items.clone()),
            items,
            ledger: PointsLedger::new(users.clone()),
            users,
            notifier,
        }
    }

    /// Create a swap request against an available item
    ///
    /// Preconditions, checked in order with the first failure winning:
    /// the requested item exists, is available and approved, and is not
    /// the requester's own; the offer is valid (an owned, available item
    /// or an affordable points amount); and no pending request from the
    /// same requester for the same item exists.
    pub async fn create_swap(
        &self,
        requester: &User,
        input: CreateSwapInput,
    ) -> DomainResult<Swap> {
        if let Some(ref message) = input.message {
            if message.len() > MAX_MESSAGE_LENGTH {
                return Err(DomainError::validation(format!(
                    "Message cannot exceed {} characters",
                    MAX_MESSAGE_LENGTH
                )));
            }
        }

        let item = match self.items.find_by_id(input.requested_item_id).await? {
            Some(item) => item,
            None => return Err(DomainError::not_found("Requested item")),
        };

        if !item.is_swappable() {
            return Err(SwapError::ItemUnavailable.into());
        }

        if item.is_owned_by(requester.id) {
            return Err(SwapError::SelfSwapForbidden.into());
        }

        match input.offer {
            SwapOffer::Item(offered_id) => {
                let offered = match self.items.find_by_id(offered_id).await? {
                    Some(offered) => offered,
                    None => {
                        return Err(SwapError::OfferedItemInvalid {
                            reason: "offered item not found".to_string(),
                        }
                        .into())
                    }
                };

                if !offered.is_owned_by(requester.id) {
                    return Err(SwapError::OfferedItemNotOwned.into());
                }

                if !offered.is_swappable() {
                    return Err(SwapError::OfferedItemInvalid {
                        reason: "offered item is not available for swap".to_string(),
                    }
                    .into());
                }
            }
            SwapOffer::Points(amount) => {
                if amount <= 0 {
                    return Err(DomainError::validation("Points offered must be positive"));
                }
                if !requester.can_afford(amount) {
                    return Err(SwapError::InsufficientPoints {
                        required: amount,
                        available: requester.points,
                    }
                    .into());
                }
            }
        }

        if self
            .swaps
            .exists_pending(requester.id, item.id)
            .await?
        {
            return Err(SwapError::DuplicateRequest.into());
        }

        let swap = Swap::new(
            requester.id,
            item.owner_id,
            item.id,
            input.offer,
            input.message,
        );
        let swap = self.swaps.create(swap).await?;

        if let Some(owner) = self.users.find_by_id(item.owner_id).await? {
            self.notify(NotificationEvent::SwapRequested {
                recipient_email: owner.email,
                requester_name: requester.full_name.clone(),
                item_title: item.title.clone(),
            })
            .await;
        }

        Ok(swap)
    }

    /// Accept a pending swap request
    ///
    /// Only the item owner may accept. Winning the pending → accepted
    /// transition is the serialization point: of two racing accepts,
    /// exactly one proceeds to settlement. For a points swap the
    /// requester's balance is re-checked by the transfer itself; when it
    /// no longer covers the offer the transition is compensated back to
    /// pending so the owner can retry later or reject.
    pub async fn accept_swap(&self, actor: &User, swap_id: Uuid) -> DomainResult<Swap> {
        let swap = self.find_swap(swap_id).await?;

        if swap.owner_id != actor.id {
            return Err(DomainError::forbidden("Not authorized to accept this swap"));
        }

        if swap.status != SwapStatus::Pending {
            return Err(SwapError::invalid_state(SwapStatus::Pending, swap.status).into());
        }

        // The requested item must still be open: another accepted swap may
        // have locked it since this request was created.
        let item = self.catalog.get_available(swap.requested_item_id).await?;
        if let SwapOffer::Item(offered_id) = swap.offer {
            if self.catalog.get_available(offered_id).await.is_err() {
                return Err(SwapError::OfferedItemInvalid {
                    reason: "offered item is no longer available".to_string(),
                }
                .into());
            }
        }

        let accepted = match self
            .swaps
            .transition(swap_id, SwapStatus::Pending, SwapTransition::accepted())
            .await?
        {
            Some(accepted) => accepted,
            None => return Err(self.state_conflict(swap_id, SwapStatus::Pending).await),
        };

        if let SwapOffer::Points(amount) = swap.offer {
            if let Err(error) = self
                .ledger
                .transfer(swap.requester_id, swap.owner_id, amount)
                .await
            {
                // Settlement failed: hand the swap back to the pending
                // state so the owner can retry or reject.
                match self
                    .swaps
                    .transition(swap_id, SwapStatus::Accepted, SwapTransition::back_to_pending())
                    .await
                {
                    Ok(Some(_)) => {}
                    Ok(None) | Err(_) => {
                        warn!(swap_id = %swap_id, "failed to compensate accept after transfer failure");
                    }
                }
                return Err(error);
            }
        }

        self.lock_item(swap.requested_item_id).await;
        if let Some(offered_id) = swap.offered_item_id() {
            self.lock_item(offered_id).await;
        }

        if let Some(requester) = self.users.find_by_id(swap.requester_id).await? {
            self.notify(NotificationEvent::SwapAccepted {
                recipient_email: requester.email,
                owner_name: actor.full_name.clone(),
                item_title: item.title.clone(),
            })
            .await;
        }

        Ok(accepted)
    }

    /// Reject a pending swap request with a reason
    ///
    /// Only the item owner may reject. Pending swaps never locked their
    /// items, so nothing is released and no points move.
    pub async fn reject_swap(
        &self,
        actor: &User,
        swap_id: Uuid,
        rejection_reason: String,
    ) -> DomainResult<Swap> {
        let swap = self.find_swap(swap_id).await?;

        if swap.owner_id != actor.id {
            return Err(DomainError::forbidden("Not authorized to reject this swap"));
        }

        let reason = rejection_reason.trim().to_string();
        if reason.is_empty() {
            return Err(DomainError::validation("Rejection reason is required"));
        }
        if reason.len() > MAX_REJECTION_REASON_LENGTH {
            return Err(DomainError::validation(format!(
                "Rejection reason cannot exceed {} characters",
                MAX_REJECTION_REASON_LENGTH
            )));
        }

        let rejected = match self
            .swaps
            .transition(
                swap_id,
                SwapStatus::Pending,
                SwapTransition::rejected(reason.clone()),
            )
            .await?
        {
            Some(rejected) => rejected,
            None => return Err(self.state_conflict(swap_id, SwapStatus::Pending).await),
        };

        let item_title = self
            .items
            .find_by_id(swap.requested_item_id)
            .await?
            .map(|i| i.title)
            .unwrap_or_default();
        if let Some(requester) = self.users.find_by_id(swap.requester_id).await? {
            self.notify(NotificationEvent::SwapRejected {
                recipient_email: requester.email,
                owner_name: actor.full_name.clone(),
                item_title,
                reason,
            })
            .await;
        }

        Ok(rejected)
    }

    /// Mark an accepted swap as completed
    ///
    /// Either party may complete; there is no mutual-confirmation step.
    /// The items covered by the swap move to `Swapped`. Item ownership is
    /// not reassigned.
    pub async fn complete_swap(&self, actor: &User, swap_id: Uuid) -> DomainResult<Swap> {
        let swap = self.find_swap(swap_id).await?;

        if !swap.involves(actor.id) {
            return Err(DomainError::forbidden(
                "Not authorized to complete this swap",
            ));
        }

        let completed = match self
            .swaps
            .transition(
                swap_id,
                SwapStatus::Accepted,
                SwapTransition::completed(Utc::now()),
            )
            .await?
        {
            Some(completed) => completed,
            None => return Err(self.state_conflict(swap_id, SwapStatus::Accepted).await),
        };

        self.items
            .update_status(swap.requested_item_id, ItemStatus::Swapped)
            .await?;
        if let Some(offered_id) = swap.offered_item_id() {
            self.items
                .update_status(offered_id, ItemStatus::Swapped)
                .await?;
        }

        Ok(completed)
    }

    /// List swaps the user participates in, newest first
    pub async fn list_swaps(
        &self,
        user: &User,
        status: Option<SwapStatus>,
        pagination: Pagination,
    ) -> DomainResult<(Vec<Swap>, u64)> {
        self.swaps.list_for_user(user.id, status, pagination).await
    }

    /// Fetch a swap or fail with NotFound
    async fn find_swap(&self, swap_id: Uuid) -> DomainResult<Swap> {
        self.swaps
            .find_by_id(swap_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Swap request"))
    }

    /// Build the InvalidState error for a lost transition race
    async fn state_conflict(&self, swap_id: Uuid, expected: SwapStatus) -> DomainError {
        let actual = match self.swaps.find_by_id(swap_id).await {
            Ok(Some(swap)) => swap.status,
            // The swap vanished or the read failed; report the expectation
            _ => expected,
        };
        SwapError::invalid_state(expected, actual).into()
    }

    /// Lock an item into `Pending`, logging when the lock was lost
    ///
    /// The availability re-check in `accept_swap` makes a lost lock a
    /// narrow race; the swap transition has already committed, so this
    /// is recorded rather than unwound.
    async fn lock_item(&self, item_id: Uuid) {
        match self.catalog.lock(item_id, ItemStatus::Pending).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(item_id = %item_id, "item was locked concurrently during accept");
            }
            Err(error) => {
                warn!(item_id = %item_id, error = %error, "failed to lock item during accept");
            }
        }
    }

    /// Deliver a notification, swallowing and logging any failure
    async fn notify(&self, event: NotificationEvent) {
        let kind = event.kind();
        if let Err(error) = self.notifier.send(event).await {
            warn!(
                event = kind,
                error = %error,
                "failed to deliver notification"
            );
        }
    }
}
