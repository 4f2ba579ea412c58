//! Workflow tests covering the swap lifecycle invariants

use std::sync::Arc;

use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::item::{
    Item, ItemCategory, ItemCondition, ItemSize, ItemStatus, NewItem,
};
use crate::domain::entities::swap::{SwapOffer, SwapStatus};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, SwapError};
use crate::repositories::{
    ItemRepository, MockItemRepository, MockSwapRepository, MockUserRepository, SwapRepository,
    UserRepository,
};
use crate::services::swap::{CreateSwapInput, SwapService};

use super::mocks::RecordingNotifier;

type TestService =
    SwapService<MockSwapRepository, MockItemRepository, MockUserRepository, RecordingNotifier>;

struct TestContext {
    swaps: Arc<MockSwapRepository>,
    items: Arc<MockItemRepository>,
    users: Arc<MockUserRepository>,
    notifier: Arc<RecordingNotifier>,
    service: TestService,
    requester: User,
    owner: User,
    item: Item,
}

fn listed_item(owner_id: Uuid, title: &str) -> Item {
    let mut item = Item::new(
        owner_id,
        NewItem {
            title: title.to_string(),
            description: "Well cared for".to_string(),
            category: ItemCategory::Tops,
            size: ItemSize::M,
            condition: ItemCondition::Good,
            color: "black".to_string(),
            brand: None,
            tags: vec![],
        },
    );
    item.approve();
    item
}

async fn setup() -> TestContext {
    setup_with_notifier(RecordingNotifier::new()).await
}

async fn setup_with_notifier(notifier: RecordingNotifier) -> TestContext {
    let requester = User::new("Riley Quinn".to_string(), "riley@example.com".to_string());
    let owner = User::new("Morgan Lee".to_string(), "morgan@example.com".to_string());
    let item = listed_item(owner.id, "Linen shirt");

    let swaps = Arc::new(MockSwapRepository::new());
    let items = Arc::new(MockItemRepository::with_items(vec![item.clone()]).await);
    let users =
        Arc::new(MockUserRepository::with_users(vec![requester.clone(), owner.clone()]).await);
    let notifier = Arc::new(notifier);

    let service = SwapService::new(
        swaps.clone(),
        items.clone(),
        users.clone(),
        notifier.clone(),
    );

    TestContext {
        swaps,
        items,
        users,
        notifier,
        service,
        requester,
        owner,
        item,
    }
}

fn points_input(ctx: &TestContext, amount: i64) -> CreateSwapInput {
    CreateSwapInput {
        requested_item_id: ctx.item.id,
        offer: SwapOffer::Points(amount),
        message: None,
    }
}

#[tokio::test]
async fn test_points_swap_full_lifecycle() {
    let ctx = setup().await;

    // Requester (100 pts) offers 30 points for the owner's item
    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();
    assert_eq!(swap.status, SwapStatus::Pending);
    assert_eq!(swap.owner_id, ctx.owner.id);
    // Items are not locked while the request is pending
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Available)
    );

    // Owner accepts: points settle, item locks
    let accepted = ctx.service.accept_swap(&ctx.owner, swap.id).await.unwrap();
    assert_eq!(accepted.status, SwapStatus::Accepted);
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(70));
    assert_eq!(ctx.users.balance_of(ctx.owner.id).await, Some(130));
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Pending)
    );

    // Owner completes: item swapped, timestamp recorded
    let completed = ctx.service.complete_swap(&ctx.owner, swap.id).await.unwrap();
    assert_eq!(completed.status, SwapStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Swapped)
    );

    // Completion does not move points again
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(70));
    assert_eq!(ctx.users.balance_of(ctx.owner.id).await, Some(130));

    assert_eq!(
        ctx.notifier.sent_kinds(),
        vec!["swap_requested", "swap_accepted"]
    );
}

#[tokio::test]
async fn test_item_swap_locks_and_completes_both_items() {
    let ctx = setup().await;
    let offered = listed_item(ctx.requester.id, "Wool scarf");
    ctx.items.create(offered.clone()).await.unwrap();

    let swap = ctx
        .service
        .create_swap(
            &ctx.requester,
            CreateSwapInput {
                requested_item_id: ctx.item.id,
                offer: SwapOffer::Item(offered.id),
                message: Some("Trade for my scarf?".to_string()),
            },
        )
        .await
        .unwrap();

    ctx.service.accept_swap(&ctx.owner, swap.id).await.unwrap();
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Pending)
    );
    assert_eq!(
        ctx.items.status_of(offered.id).await,
        Some(ItemStatus::Pending)
    );

    // Reject is impossible once accepted
    let err = ctx
        .service
        .reject_swap(&ctx.owner, swap.id, "too late".to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::InvalidState { .. })
    ));

    // Requester may complete unilaterally
    ctx.service
        .complete_swap(&ctx.requester, swap.id)
        .await
        .unwrap();
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Swapped)
    );
    assert_eq!(
        ctx.items.status_of(offered.id).await,
        Some(ItemStatus::Swapped)
    );

    // No points move in an item-for-item swap
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(100));
    assert_eq!(ctx.users.balance_of(ctx.owner.id).await, Some(100));
}

#[tokio::test]
async fn test_create_fails_on_insufficient_points() {
    let ctx = setup().await;
    let mut poor = User::new("Sam".to_string(), "sam@example.com".to_string());
    poor.points = 10;
    ctx.users.create(poor.clone()).await.unwrap();

    let err = ctx
        .service
        .create_swap(&poor, points_input(&ctx, 50))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::InsufficientPoints {
            required: 50,
            available: 10
        })
    ));
    // No swap was created
    assert_eq!(ctx.swaps.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_self_swap_is_forbidden() {
    let ctx = setup().await;

    let err = ctx
        .service
        .create_swap(&ctx.owner, points_input(&ctx, 10))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::SelfSwapForbidden)
    ));
}

#[tokio::test]
async fn test_create_rejects_unapproved_or_locked_item() {
    let ctx = setup().await;

    let unapproved = Item::new(
        ctx.owner.id,
        NewItem {
            title: "Unreviewed coat".to_string(),
            description: "Waiting for moderation".to_string(),
            category: ItemCategory::Outerwear,
            size: ItemSize::S,
            condition: ItemCondition::New,
            color: "red".to_string(),
            brand: None,
            tags: vec![],
        },
    );
    ctx.items.create(unapproved.clone()).await.unwrap();

    let err = ctx
        .service
        .create_swap(
            &ctx.requester,
            CreateSwapInput {
                requested_item_id: unapproved.id,
                offer: SwapOffer::Points(10),
                message: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Swap(SwapError::ItemUnavailable)));

    ctx.items
        .lock_if_available(ctx.item.id, ItemStatus::Pending)
        .await
        .unwrap();
    let err = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Swap(SwapError::ItemUnavailable)));
}

#[tokio::test]
async fn test_missing_requested_item_is_not_found() {
    let ctx = setup().await;

    let err = ctx
        .service
        .create_swap(
            &ctx.requester,
            CreateSwapInput {
                requested_item_id: Uuid::new_v4(),
                offer: SwapOffer::Points(10),
                message: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_offered_item_must_be_owned_and_available() {
    let ctx = setup().await;
    let third = User::new("Jess".to_string(), "jess@example.com".to_string());
    let someone_elses = listed_item(third.id, "Not mine");
    ctx.items.create(someone_elses.clone()).await.unwrap();

    let err = ctx
        .service
        .create_swap(
            &ctx.requester,
            CreateSwapInput {
                requested_item_id: ctx.item.id,
                offer: SwapOffer::Item(someone_elses.id),
                message: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::OfferedItemNotOwned)
    ));

    let err = ctx
        .service
        .create_swap(
            &ctx.requester,
            CreateSwapInput {
                requested_item_id: ctx.item.id,
                offer: SwapOffer::Item(Uuid::new_v4()),
                message: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::OfferedItemInvalid { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_pending_request_rejected() {
    let ctx = setup().await;

    ctx.service
        .create_swap(&ctx.requester, points_input(&ctx, 10))
        .await
        .unwrap();
    let err = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Swap(SwapError::DuplicateRequest)));
}

#[tokio::test]
async fn test_accept_requires_ownership() {
    let ctx = setup().await;
    let stranger = User::new("Jo".to_string(), "jo@example.com".to_string());
    ctx.users.create(stranger.clone()).await.unwrap();

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();

    let err = ctx
        .service
        .accept_swap(&stranger, swap.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    // No mutation happened
    let unchanged = ctx.swaps.find_by_id(swap.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, SwapStatus::Pending);
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(100));
}

#[tokio::test]
async fn test_racing_accepts_transfer_exactly_once() {
    let ctx = setup().await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        ctx.service.accept_swap(&ctx.owner, swap.id),
        ctx.service.accept_swap(&ctx.owner, swap.id),
    );

    // Exactly one accept wins; the loser observes a state conflict,
    // either on the swap status or on the already-locked item
    let outcomes = [first.is_ok(), second.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(
                err,
                DomainError::Swap(
                    SwapError::InvalidState { .. } | SwapError::ItemUnavailable
                )
            ));
        }
    }

    // The transfer applied exactly once
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(70));
    assert_eq!(ctx.users.balance_of(ctx.owner.id).await, Some(130));
}

#[tokio::test]
async fn test_accept_with_depleted_balance_leaves_swap_pending() {
    let ctx = setup().await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 80))
        .await
        .unwrap();

    // The requester spends points elsewhere between create and accept
    ctx.users.debit_points(ctx.requester.id, 90).await.unwrap();

    let err = ctx.service.accept_swap(&ctx.owner, swap.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::InsufficientPoints { required: 80, .. })
    ));

    // The swap returns to pending for retry-or-reject, nothing settled
    let swap_after = ctx.swaps.find_by_id(swap.id).await.unwrap().unwrap();
    assert_eq!(swap_after.status, SwapStatus::Pending);
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(10));
    assert_eq!(ctx.users.balance_of(ctx.owner.id).await, Some(100));
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Available)
    );

    // The owner can still reject it
    ctx.service
        .reject_swap(&ctx.owner, swap.id, "No funds, no deal".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_accept_rechecks_item_availability() {
    let ctx = setup().await;
    let other_requester = User::new("Kai".to_string(), "kai@example.com".to_string());
    ctx.users.create(other_requester.clone()).await.unwrap();

    let first = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();
    let second = ctx
        .service
        .create_swap(&other_requester, points_input(&ctx, 40))
        .await
        .unwrap();

    ctx.service.accept_swap(&ctx.owner, first.id).await.unwrap();

    // The item is now locked; the competing request cannot be accepted
    let err = ctx
        .service
        .accept_swap(&ctx.owner, second.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Swap(SwapError::ItemUnavailable)));

    // The second requester's points never moved
    assert_eq!(ctx.users.balance_of(other_requester.id).await, Some(100));
    let second_after = ctx.swaps.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(second_after.status, SwapStatus::Pending);
}

#[tokio::test]
async fn test_terminal_swaps_are_immutable() {
    let ctx = setup().await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();
    ctx.service
        .reject_swap(&ctx.owner, swap.id, "Not interested".to_string())
        .await
        .unwrap();

    for result in [
        ctx.service.accept_swap(&ctx.owner, swap.id).await,
        ctx.service
            .reject_swap(&ctx.owner, swap.id, "again".to_string())
            .await,
        ctx.service.complete_swap(&ctx.owner, swap.id).await,
    ] {
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Swap(SwapError::InvalidState { .. })
        ));
    }

    // Balances and item state never moved
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(100));
    assert_eq!(
        ctx.items.status_of(ctx.item.id).await,
        Some(ItemStatus::Available)
    );
}

#[tokio::test]
async fn test_complete_requires_accepted_state() {
    let ctx = setup().await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();

    let err = ctx
        .service
        .complete_swap(&ctx.requester, swap.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Swap(SwapError::InvalidState { .. })
    ));
}

#[tokio::test]
async fn test_complete_requires_participation() {
    let ctx = setup().await;
    let stranger = User::new("Jo".to_string(), "jo@example.com".to_string());

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();
    ctx.service.accept_swap(&ctx.owner, swap.id).await.unwrap();

    let err = ctx
        .service
        .complete_swap(&stranger, swap.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let ctx = setup().await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();

    let err = ctx
        .service
        .reject_swap(&ctx.owner, swap.id, "   ".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = ctx
        .service
        .reject_swap(&ctx.owner, swap.id, "x".repeat(301))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    // A proper reason lands, trimmed
    let rejected = ctx
        .service
        .reject_swap(&ctx.owner, swap.id, "  Looking for a trade  ".to_string())
        .await
        .unwrap();
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Looking for a trade")
    );
    assert_eq!(ctx.notifier.sent_kinds().last(), Some(&"swap_rejected"));
}

#[tokio::test]
async fn test_notification_failure_never_fails_the_workflow() {
    let ctx = setup_with_notifier(RecordingNotifier::failing()).await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();
    let accepted = ctx.service.accept_swap(&ctx.owner, swap.id).await.unwrap();

    assert_eq!(accepted.status, SwapStatus::Accepted);
    assert_eq!(ctx.users.balance_of(ctx.requester.id).await, Some(70));
    assert!(ctx.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_list_swaps_sees_both_sides() {
    let ctx = setup().await;

    let swap = ctx
        .service
        .create_swap(&ctx.requester, points_input(&ctx, 30))
        .await
        .unwrap();

    let (as_requester, total) = ctx
        .service
        .list_swaps(&ctx.requester, None, Pagination::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(as_requester[0].id, swap.id);

    let (as_owner, _) = ctx
        .service
        .list_swaps(&ctx.owner, Some(SwapStatus::Pending), Pagination::default())
        .await
        .unwrap();
    assert_eq!(as_owner.len(), 1);

    let (completed_only, _) = ctx
        .service
        .list_swaps(&ctx.owner, Some(SwapStatus::Completed), Pagination::default())
        .await
        .unwrap();
    assert!(completed_only.is_empty());
}
