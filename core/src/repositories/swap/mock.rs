//! Mock implementation of SwapRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::swap::{Swap, SwapStatus};
use crate::errors::DomainError;

use super::trait_::{SwapRepository, SwapTransition};

/// Mock swap repository for testing
///
/// `transition` checks and mutates under one write lock, mirroring the
/// conditional-UPDATE semantics of the real store.
pub struct MockSwapRepository {
    swaps: Arc<RwLock<HashMap<Uuid, Swap>>>,
}

impl MockSwapRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            swaps: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository pre-seeded with swaps
    pub async fn with_swaps(swaps: Vec<Swap>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.swaps.write().await;
            for swap in swaps {
                map.insert(swap.id, swap);
            }
        }
        repo
    }
}

impl Default for MockSwapRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SwapRepository for MockSwapRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Swap>, DomainError> {
        let swaps = self.swaps.read().await;
        Ok(swaps.get(&id).cloned())
    }

    async fn create(&self, swap: Swap) -> Result<Swap, DomainError> {
        let mut swaps = self.swaps.write().await;
        swaps.insert(swap.id, swap.clone());
        Ok(swap)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<Swap>, u64), DomainError> {
        let swaps = self.swaps.read().await;
        let mut matching: Vec<Swap> = swaps
            .values()
            .filter(|s| s.involves(user_id))
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn exists_pending(
        &self,
        requester_id: Uuid,
        requested_item_id: Uuid,
    ) -> Result<bool, DomainError> {
        let swaps = self.swaps.read().await;
        Ok(swaps.values().any(|s| {
            s.requester_id == requester_id
                && s.requested_item_id == requested_item_id
                && s.status == SwapStatus::Pending
        }))
    }

    async fn transition(
        &self,
        id: Uuid,
        expected: SwapStatus,
        transition: SwapTransition,
    ) -> Result<Option<Swap>, DomainError> {
        let mut swaps = self.swaps.write().await;

        let swap = swaps
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Swap request"))?;

        if swap.status != expected {
            return Ok(None);
        }

        swap.status = transition.status;
        if transition.rejection_reason.is_some() {
            swap.rejection_reason = transition.rejection_reason;
        }
        if transition.completed_at.is_some() {
            swap.completed_at = transition.completed_at;
        }
        swap.updated_at = Utc::now();
        Ok(Some(swap.clone()))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let swaps = self.swaps.read().await;
        Ok(swaps.len() as u64)
    }

    async fn count_by_status(&self, status: SwapStatus) -> Result<u64, DomainError> {
        let swaps = self.swaps.read().await;
        Ok(swaps.values().filter(|s| s.status == status).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::swap::SwapOffer;

    fn pending_swap() -> Swap {
        Swap::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            SwapOffer::Points(25),
            None,
        )
    }

    #[tokio::test]
    async fn test_transition_wins_only_from_expected_state() {
        let swap = pending_swap();
        let id = swap.id;
        let repo = MockSwapRepository::with_swaps(vec![swap]).await;

        let won = repo
            .transition(id, SwapStatus::Pending, SwapTransition::accepted())
            .await
            .unwrap();
        assert_eq!(won.unwrap().status, SwapStatus::Accepted);

        // A second accept finds the swap no longer pending
        let lost = repo
            .transition(id, SwapStatus::Pending, SwapTransition::accepted())
            .await
            .unwrap();
        assert!(lost.is_none());
    }

    #[tokio::test]
    async fn test_transition_missing_swap_is_not_found() {
        let repo = MockSwapRepository::new();
        let result = repo
            .transition(Uuid::new_v4(), SwapStatus::Pending, SwapTransition::accepted())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_exists_pending_ignores_terminal_requests() {
        let mut swap = pending_swap();
        let (requester, item) = (swap.requester_id, swap.requested_item_id);
        swap.reject("changed my mind".to_string());
        let repo = MockSwapRepository::with_swaps(vec![swap]).await;

        assert!(!repo.exists_pending(requester, item).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_by_party_and_status() {
        let swap_a = pending_swap();
        let requester = swap_a.requester_id;
        let mut swap_b = Swap::new(
            requester,
            Uuid::new_v4(),
            Uuid::new_v4(),
            SwapOffer::Points(5),
            None,
        );
        swap_b.accept();
        let unrelated = pending_swap();
        let repo = MockSwapRepository::with_swaps(vec![swap_a, swap_b, unrelated]).await;

        let (all, total) = repo
            .list_for_user(requester, None, Pagination::default())
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(all.len(), 2);

        let (accepted, _) = repo
            .list_for_user(requester, Some(SwapStatus::Accepted), Pagination::default())
            .await
            .unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].status, SwapStatus::Accepted);
    }
}
