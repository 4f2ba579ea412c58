//! End-to-end workflow test over the public crate API: a listing moves
//! through moderation, a points swap settles, and the catalog state stays
//! consistent at every step.

use std::sync::Arc;

use async_trait::async_trait;

use rw_core::domain::entities::item::{
    ItemCategory, ItemCondition, ItemSize, ItemStatus, NewItem,
};
use rw_core::domain::entities::swap::{SwapOffer, SwapStatus};
use rw_core::domain::entities::user::User;
use rw_core::domain::events::NotificationEvent;
use rw_core::repositories::{
    MockItemRepository, MockSwapRepository, MockUserRepository,
};
use rw_core::services::notification::{NotificationError, NotificationService};
use rw_core::services::{CreateSwapInput, ItemService, SwapService};

struct NullNotifier;

#[async_trait]
impl NotificationService for NullNotifier {
    async fn send(&self, _event: NotificationEvent) -> Result<(), NotificationError> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[tokio::test]
async fn listing_to_completed_swap() {
    let requester = User::new("Riley Quinn".to_string(), "riley@example.com".to_string());
    let owner = User::new("Morgan Lee".to_string(), "morgan@example.com".to_string());

    let users =
        Arc::new(MockUserRepository::with_users(vec![requester.clone(), owner.clone()]).await);
    let items = Arc::new(MockItemRepository::new());
    let swaps = Arc::new(MockSwapRepository::new());
    let notifier = Arc::new(NullNotifier);

    let item_service = ItemService::new(items.clone(), users.clone(), notifier.clone());
    let swap_service = SwapService::new(swaps, items.clone(), users.clone(), notifier);

    // The owner lists a garment; it is not yet swappable
    let listing = item_service
        .create_item(
            &owner,
            NewItem {
                title: "Camel coat".to_string(),
                description: "Wool blend, tailored fit".to_string(),
                category: ItemCategory::Outerwear,
                size: ItemSize::M,
                condition: ItemCondition::LikeNew,
                color: "camel".to_string(),
                brand: None,
                tags: vec!["winter".to_string()],
            },
        )
        .await
        .unwrap();

    let premature = swap_service
        .create_swap(
            &requester,
            CreateSwapInput {
                requested_item_id: listing.id,
                offer: SwapOffer::Points(15),
                message: None,
            },
        )
        .await;
    assert!(premature.is_err());

    // Moderation approves, the swap goes through its full lifecycle
    item_service.approve_item(listing.id).await.unwrap();

    let swap = swap_service
        .create_swap(
            &requester,
            CreateSwapInput {
                requested_item_id: listing.id,
                offer: SwapOffer::Points(15),
                message: Some("Perfect for the season".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(swap.status, SwapStatus::Pending);

    let accepted = swap_service.accept_swap(&owner, swap.id).await.unwrap();
    assert_eq!(accepted.status, SwapStatus::Accepted);
    assert_eq!(users.balance_of(requester.id).await, Some(85));
    assert_eq!(users.balance_of(owner.id).await, Some(115));
    assert_eq!(items.status_of(listing.id).await, Some(ItemStatus::Pending));

    let completed = swap_service
        .complete_swap(&requester, swap.id)
        .await
        .unwrap();
    assert_eq!(completed.status, SwapStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(items.status_of(listing.id).await, Some(ItemStatus::Swapped));

    // Ownership is not reassigned on completion
    let final_item = item_service.get_item(listing.id).await.unwrap();
    assert_eq!(final_item.owner_id, owner.id);
}
