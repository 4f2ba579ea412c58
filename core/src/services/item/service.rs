//! Item listing lifecycle: creation, edits, browsing and moderation.
//!
//! Listings enter the catalog unapproved and become swappable only after
//! moderation approves them. Any edit sends the listing back through
//! moderation. Availability transitions for items under swap negotiation
//! are owned by the swap workflow engine, not by this service.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::item::{Item, NewItem};
use crate::domain::entities::user::User;
use crate::domain::events::NotificationEvent;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ItemFilter, ItemRepository, UserRepository};
use crate::services::notification::NotificationService;

/// Maximum listing title length
const MAX_TITLE_LENGTH: usize = 100;

/// Maximum listing description length
const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Item listing and moderation service
pub struct ItemService<I, U, N>
where
    I: ItemRepository,
    U: UserRepository,
    N: NotificationService + ?Sized,
{
    items: Arc<I>,
    users: Arc<U>,
    notifier: Arc<N>,
}

impl<I, U, N> ItemService<I, U, N>
where
    I: ItemRepository,
    U: UserRepository,
    N: NotificationService + ?Sized,
{
    /// Create a new item service
    pub fn new(items: Arc<I>, users: Arc<U>, notifier: Arc<N>) -> Self {
        Self {
            items,
            users,
            notifier,
        }
    }

    /// Create a new listing for the acting user
    ///
    /// The listing starts unapproved; moderation must approve it before
    /// it appears in the public catalog.
    pub async fn create_item(&self, owner: &User, input: NewItem) -> DomainResult<Item> {
        validate_listing(&input)?;
        let item = Item::new(owner.id, input);
        self.items.create(item).await
    }

    /// Fetch a single listing
    pub async fn get_item(&self, id: Uuid) -> DomainResult<Item> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item"))
    }

    /// Browse the public catalog: approved, available items only
    pub async fn list_items(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> DomainResult<(Vec<Item>, u64)> {
        self.items.list_available(filter, pagination).await
    }

    /// List the acting user's own items, any state
    pub async fn list_user_items(
        &self,
        user: &User,
        pagination: Pagination,
    ) -> DomainResult<(Vec<Item>, u64)> {
        self.items.list_by_owner(user.id, pagination).await
    }

    /// Edit a listing; only the owner may edit
    ///
    /// The edit recomputes the point value and resets approval, sending
    /// the listing back through moderation.
    pub async fn update_item(
        &self,
        actor: &User,
        id: Uuid,
        input: NewItem,
    ) -> DomainResult<Item> {
        validate_listing(&input)?;
        let mut item = self.get_item(id).await?;

        if !item.is_owned_by(actor.id) {
            return Err(DomainError::forbidden("Not authorized to update this item"));
        }

        item.apply_edit(input);
        self.items.update(item).await
    }

    /// Delete a listing; the owner or an admin may delete
    pub async fn delete_item(&self, actor: &User, id: Uuid) -> DomainResult<()> {
        let item = self.get_item(id).await?;

        if !item.is_owned_by(actor.id) && !actor.is_admin() {
            return Err(DomainError::forbidden("Not authorized to delete this item"));
        }

        self.items.delete(id).await?;
        Ok(())
    }

    /// List items awaiting moderation
    pub async fn list_pending(
        &self,
        pagination: Pagination,
    ) -> DomainResult<(Vec<Item>, u64)> {
        self.items.list_unapproved(pagination).await
    }

    /// Approve a listing, making it swappable
    pub async fn approve_item(&self, id: Uuid) -> DomainResult<Item> {
        let mut item = self.get_item(id).await?;
        item.approve();
        let item = self.items.update(item).await?;

        if let Some(owner) = self.users.find_by_id(item.owner_id).await? {
            self.notify(NotificationEvent::ItemApproved {
                recipient_email: owner.email,
                item_title: item.title.clone(),
            })
            .await;
        }

        Ok(item)
    }

    /// Reject a listing with a reason
    pub async fn reject_item(&self, id: Uuid, rejection_reason: String) -> DomainResult<Item> {
        let reason = rejection_reason.trim().to_string();
        if reason.is_empty() {
            return Err(DomainError::validation("Rejection reason is required"));
        }

        let mut item = self.get_item(id).await?;
        item.reject(reason.clone());
        let item = self.items.update(item).await?;

        if let Some(owner) = self.users.find_by_id(item.owner_id).await? {
            self.notify(NotificationEvent::ItemRejected {
                recipient_email: owner.email,
                item_title: item.title.clone(),
                reason,
            })
            .await;
        }

        Ok(item)
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

fn validate_listing(input: &NewItem) -> DomainResult<()> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(DomainError::validation(format!(
            "Title cannot exceed {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if input.description.trim().is_empty() {
        return Err(DomainError::validation("Description is required"));
    }
    if input.description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::validation(format!(
            "Description cannot exceed {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}
