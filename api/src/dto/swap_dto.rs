//! Swap endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rw_core::domain::entities::swap::{Swap, SwapOffer, SwapStatus};
use rw_shared::types::Pagination;

/// Request body for POST /swaps
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequest {
    /// The item the caller wants
    pub requested_item: Uuid,

    /// An item of the caller's to trade
    pub offered_item: Option<Uuid>,

    /// A points payment instead of an item
    #[validate(range(min = 1))]
    pub points_offered: Option<i64>,

    /// Optional message to the owner
    #[validate(length(max = 500))]
    pub message: Option<String>,
}

impl CreateSwapRequest {
    /// Resolve the offer, enforcing the exactly-one rule
    pub fn offer(&self) -> Result<SwapOffer, &'static str> {
        match (self.offered_item, self.points_offered) {
            (Some(item), None) => Ok(SwapOffer::Item(item)),
            (None, Some(points)) => Ok(SwapOffer::Points(points)),
            (Some(_), Some(_)) => Err("Cannot offer both an item and points"),
            (None, None) => Err("Either an offered item or points must be provided"),
        }
    }
}

/// Query parameters for GET /swaps
#[derive(Debug, Clone, Deserialize)]
pub struct ListSwapsQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListSwapsQuery {
    /// Pagination with defaults applied
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), self.limit.unwrap_or(10))
    }

    /// Parse the optional status filter
    pub fn status_filter(&self) -> Result<Option<SwapStatus>, String> {
        match &self.status {
            None => Ok(None),
            Some(raw) => SwapStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| format!("Unknown swap status: {}", raw)),
        }
    }
}

/// Request body for PUT /swaps/{id}/reject
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectSwapRequest {
    #[validate(length(min = 1, max = 300))]
    pub rejection_reason: String,
}

/// Swap representation returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub id: Uuid,
    pub requester: Uuid,
    pub owner: Uuid,
    pub requested_item: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_item: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_offered: Option<i64>,
    pub status: SwapStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Swap> for SwapResponse {
    fn from(swap: Swap) -> Self {
        Self {
            id: swap.id,
            requester: swap.requester_id,
            owner: swap.owner_id,
            requested_item: swap.requested_item_id,
            offered_item: swap.offered_item_id(),
            points_offered: swap.points_offered(),
            status: swap.status,
            message: swap.message,
            rejection_reason: swap.rejection_reason,
            completed_at: swap.completed_at,
            created_at: swap.created_at,
            updated_at: swap.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateSwapRequest {
        CreateSwapRequest {
            requested_item: Uuid::new_v4(),
            offered_item: None,
            points_offered: Some(30),
            message: None,
        }
    }

    #[test]
    fn test_exactly_one_offer_enforced() {
        let mut request = base_request();
        assert!(request.offer().is_ok());

        request.offered_item = Some(Uuid::new_v4());
        assert!(request.offer().is_err());

        request.points_offered = None;
        assert!(request.offer().is_ok());

        request.offered_item = None;
        assert!(request.offer().is_err());
    }

    #[test]
    fn test_points_must_be_positive() {
        let mut request = base_request();
        request.points_offered = Some(0);
        assert!(request.validate().is_err());

        request.points_offered = Some(1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_message_length_bound() {
        let mut request = base_request();
        request.message = Some("m".repeat(501));
        assert!(request.validate().is_err());

        request.message = Some("m".repeat(500));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let body = serde_json::json!({
            "requestedItem": Uuid::new_v4(),
            "pointsOffered": 25
        });
        let request: CreateSwapRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.points_offered, Some(25));
    }

    #[test]
    fn test_status_filter_parsing() {
        let query = ListSwapsQuery {
            status: Some("accepted".to_string()),
            page: None,
            limit: None,
        };
        assert_eq!(query.status_filter().unwrap(), Some(SwapStatus::Accepted));

        let query = ListSwapsQuery {
            status: Some("bogus".to_string()),
            page: None,
            limit: None,
        };
        assert!(query.status_filter().is_err());
    }

    #[test]
    fn test_rejection_reason_bounds() {
        let request = RejectSwapRequest {
            rejection_reason: String::new(),
        };
        assert!(request.validate().is_err());

        let request = RejectSwapRequest {
            rejection_reason: "r".repeat(301),
        };
        assert!(request.validate().is_err());

        let request = RejectSwapRequest {
            rejection_reason: "Looking for a trade".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
