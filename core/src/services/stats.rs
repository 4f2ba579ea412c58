//! Platform statistics for the admin dashboard.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::swap::SwapStatus;
use crate::errors::DomainResult;
use crate::repositories::{ItemRepository, SwapRepository, UserRepository};

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_items: u64,
    pub approved_items: u64,
    pub pending_items: u64,
    pub total_swaps: u64,
    pub completed_swaps: u64,
    pub pending_swaps: u64,
}

/// Read-only aggregation over the three stores
pub struct StatsService<U, I, S>
where
    U: UserRepository,
    I: ItemRepository,
    S: SwapRepository,
{
    users: Arc<U>,
    items: Arc<I>,
    swaps: Arc<S>,
}

impl<U, I, S> StatsService<U, I, S>
where
    U: UserRepository,
    I: ItemRepository,
    S: SwapRepository,
{
    /// Create a new stats service
    pub fn new(users: Arc<U>, items: Arc<I>, swaps: Arc<S>) -> Self {
        Self {
            users,
            items,
            swaps,
        }
    }

    /// Collect the platform-wide counts
    pub async fn platform_stats(&self) -> DomainResult<PlatformStats> {
        Ok(PlatformStats {
            total_users: self.users.count().await?,
            total_items: self.items.count().await?,
            approved_items: self.items.count_by_approval(true).await?,
            pending_items: self.items.count_by_approval(false).await?,
            total_swaps: self.swaps.count().await?,
            completed_swaps: self.swaps.count_by_status(SwapStatus::Completed).await?,
            pending_swaps: self.swaps.count_by_status(SwapStatus::Pending).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::item::{Item, ItemCategory, ItemCondition, ItemSize, NewItem};
    use crate::domain::entities::swap::{Swap, SwapOffer};
    use crate::domain::entities::user::User;
    use crate::repositories::{MockItemRepository, MockSwapRepository, MockUserRepository};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_platform_stats_counts() {
        let user = User::new("Ava".to_string(), "ava@example.com".to_string());

        let mut approved = Item::new(
            user.id,
            NewItem {
                title: "Silk scarf".to_string(),
                description: "Hand-rolled edges".to_string(),
                category: ItemCategory::Accessories,
                size: ItemSize::S,
                condition: ItemCondition::New,
                color: "ivory".to_string(),
                brand: None,
                tags: vec![],
            },
        );
        approved.approve();
        let unapproved = Item::new(
            user.id,
            NewItem {
                title: "Plain tee".to_string(),
                description: "Everyday staple".to_string(),
                category: ItemCategory::Tops,
                size: ItemSize::M,
                condition: ItemCondition::Fair,
                color: "white".to_string(),
                brand: None,
                tags: vec![],
            },
        );

        let pending_swap = Swap::new(
            Uuid::new_v4(),
            user.id,
            approved.id,
            SwapOffer::Points(5),
            None,
        );
        let mut completed_swap = Swap::new(
            Uuid::new_v4(),
            user.id,
            approved.id,
            SwapOffer::Points(5),
            None,
        );
        completed_swap.accept();
        completed_swap.complete(chrono::Utc::now());

        let service = StatsService::new(
            Arc::new(MockUserRepository::with_users(vec![user]).await),
            Arc::new(MockItemRepository::with_items(vec![approved, unapproved]).await),
            Arc::new(MockSwapRepository::with_swaps(vec![pending_swap, completed_swap]).await),
        );

        let stats = service.platform_stats().await.unwrap();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.approved_items, 1);
        assert_eq!(stats.pending_items, 1);
        assert_eq!(stats.total_swaps, 2);
        assert_eq!(stats.completed_swaps, 1);
        assert_eq!(stats.pending_swaps, 1);
    }
}
