//! Listing lifecycle and moderation tests

use std::sync::Arc;

use rw_shared::types::Pagination;

use crate::domain::entities::item::{ItemCategory, ItemCondition, ItemSize, ItemStatus, NewItem};
use crate::domain::entities::user::{User, UserRole};
use crate::errors::DomainError;
use crate::repositories::{ItemFilter, MockItemRepository, MockUserRepository};
use crate::services::item::ItemService;

use super::mocks::RecordingNotifier;

type TestService = ItemService<MockItemRepository, MockUserRepository, RecordingNotifier>;

struct TestContext {
    notifier: Arc<RecordingNotifier>,
    service: TestService,
    owner: User,
    admin: User,
}

async fn setup() -> TestContext {
    let owner = User::new("Morgan Lee".to_string(), "morgan@example.com".to_string());
    let mut admin = User::new("Dana Cruz".to_string(), "dana@example.com".to_string());
    admin.set_role(UserRole::Admin);

    let items = Arc::new(MockItemRepository::new());
    let users = Arc::new(MockUserRepository::with_users(vec![owner.clone(), admin.clone()]).await);
    let notifier = Arc::new(RecordingNotifier::new());
    let service = ItemService::new(items, users, notifier.clone());

    TestContext {
        notifier,
        service,
        owner,
        admin,
    }
}

fn jacket_input() -> NewItem {
    NewItem {
        title: "Denim jacket".to_string(),
        description: "Classic fit, barely worn".to_string(),
        category: ItemCategory::Outerwear,
        size: ItemSize::M,
        condition: ItemCondition::LikeNew,
        color: "blue".to_string(),
        brand: Some("Levi".to_string()),
        tags: vec!["denim".to_string()],
    }
}

#[tokio::test]
async fn test_new_listing_goes_through_moderation() {
    let ctx = setup().await;

    let item = ctx
        .service
        .create_item(&ctx.owner, jacket_input())
        .await
        .unwrap();
    assert!(!item.is_approved);
    // like-new base 15, Levi premium multiplier
    assert_eq!(item.point_value, 20);

    // Invisible to the public catalog until approved
    let (browse, _) = ctx
        .service
        .list_items(&ItemFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert!(browse.is_empty());

    let (pending, total) = ctx.service.list_pending(Pagination::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(pending[0].id, item.id);

    let approved = ctx.service.approve_item(item.id).await.unwrap();
    assert!(approved.is_approved);
    assert_eq!(ctx.notifier.sent_kinds(), vec!["item_approved"]);

    let (browse, _) = ctx
        .service
        .list_items(&ItemFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(browse.len(), 1);
}

#[tokio::test]
async fn test_edit_resets_approval() {
    let ctx = setup().await;

    let item = ctx
        .service
        .create_item(&ctx.owner, jacket_input())
        .await
        .unwrap();
    ctx.service.approve_item(item.id).await.unwrap();

    let mut edit = jacket_input();
    edit.condition = ItemCondition::Good;
    edit.brand = None;
    let edited = ctx
        .service
        .update_item(&ctx.owner, item.id, edit)
        .await
        .unwrap();

    assert!(!edited.is_approved);
    assert_eq!(edited.point_value, 12);
}

#[tokio::test]
async fn test_only_owner_edits() {
    let ctx = setup().await;
    let stranger = User::new("Jo".to_string(), "jo@example.com".to_string());

    let item = ctx
        .service
        .create_item(&ctx.owner, jacket_input())
        .await
        .unwrap();

    let err = ctx
        .service
        .update_item(&stranger, item.id, jacket_input())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));
}

#[tokio::test]
async fn test_admin_can_delete_any_listing() {
    let ctx = setup().await;
    let stranger = User::new("Jo".to_string(), "jo@example.com".to_string());

    let item = ctx
        .service
        .create_item(&ctx.owner, jacket_input())
        .await
        .unwrap();

    let err = ctx.service.delete_item(&stranger, item.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    ctx.service.delete_item(&ctx.admin, item.id).await.unwrap();
    assert!(ctx.service.get_item(item.id).await.is_err());
}

#[tokio::test]
async fn test_moderation_reject_requires_reason() {
    let ctx = setup().await;

    let item = ctx
        .service
        .create_item(&ctx.owner, jacket_input())
        .await
        .unwrap();

    let err = ctx
        .service
        .reject_item(item.id, "  ".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let rejected = ctx
        .service
        .reject_item(item.id, "Photos are too blurry".to_string())
        .await
        .unwrap();
    assert_eq!(rejected.status, ItemStatus::Rejected);
    assert_eq!(ctx.notifier.sent_kinds(), vec!["item_rejected"]);
}

#[tokio::test]
async fn test_listing_validation() {
    let ctx = setup().await;

    let mut input = jacket_input();
    input.title = "".to_string();
    assert!(matches!(
        ctx.service.create_item(&ctx.owner, input).await,
        Err(DomainError::Validation { .. })
    ));

    let mut input = jacket_input();
    input.description = "d".repeat(1001);
    assert!(matches!(
        ctx.service.create_item(&ctx.owner, input).await,
        Err(DomainError::Validation { .. })
    ));
}
