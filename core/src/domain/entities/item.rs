//! Item entity representing a garment listed for exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Dresses,
    Tops,
    Bottoms,
    Accessories,
    Shoes,
    Outerwear,
}

impl ItemCategory {
    /// Wire form of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Dresses => "dresses",
            ItemCategory::Tops => "tops",
            ItemCategory::Bottoms => "bottoms",
            ItemCategory::Accessories => "accessories",
            ItemCategory::Shoes => "shoes",
            ItemCategory::Outerwear => "outerwear",
        }
    }

    /// Parse a category from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dresses" => Some(ItemCategory::Dresses),
            "tops" => Some(ItemCategory::Tops),
            "bottoms" => Some(ItemCategory::Bottoms),
            "accessories" => Some(ItemCategory::Accessories),
            "shoes" => Some(ItemCategory::Shoes),
            "outerwear" => Some(ItemCategory::Outerwear),
            _ => None,
        }
    }
}

/// Garment size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl ItemSize {
    /// Wire form of the size
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSize::Xs => "XS",
            ItemSize::S => "S",
            ItemSize::M => "M",
            ItemSize::L => "L",
            ItemSize::Xl => "XL",
            ItemSize::Xxl => "XXL",
        }
    }

    /// Parse a size from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "XS" => Some(ItemSize::Xs),
            "S" => Some(ItemSize::S),
            "M" => Some(ItemSize::M),
            "L" => Some(ItemSize::L),
            "XL" => Some(ItemSize::Xl),
            "XXL" => Some(ItemSize::Xxl),
            _ => None,
        }
    }
}

/// Garment condition, one factor of the point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCondition {
    New,
    LikeNew,
    Good,
    Fair,
}

impl ItemCondition {
    /// Wire form of the condition
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::New => "new",
            ItemCondition::LikeNew => "like-new",
            ItemCondition::Good => "good",
            ItemCondition::Fair => "fair",
        }
    }

    /// Parse a condition from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(ItemCondition::New),
            "like-new" => Some(ItemCondition::LikeNew),
            "good" => Some(ItemCondition::Good),
            "fair" => Some(ItemCondition::Fair),
            _ => None,
        }
    }
}

/// Availability state of an item
///
/// An item leaves `Available` when a swap covering it is accepted and
/// never returns: `Pending` while the exchange is in negotiation,
/// `Swapped` once completed. `Rejected` is set by moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Pending,
    Swapped,
    Rejected,
}

impl ItemStatus {
    /// Wire form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Pending => "pending",
            ItemStatus::Swapped => "swapped",
            ItemStatus::Rejected => "rejected",
        }
    }

    /// Parse a status from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(ItemStatus::Available),
            "pending" => Some(ItemStatus::Pending),
            "swapped" => Some(ItemStatus::Swapped),
            "rejected" => Some(ItemStatus::Rejected),
            _ => None,
        }
    }
}

/// Input for creating a new item listing
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub size: ItemSize,
    pub condition: ItemCondition,
    pub color: String,
    pub brand: Option<String>,
    pub tags: Vec<String>,
}

/// Item entity representing a listed garment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for the item
    pub id: Uuid,

    /// Listing title
    pub title: String,

    /// Listing description
    pub description: String,

    /// Garment category
    pub category: ItemCategory,

    /// Garment size
    pub size: ItemSize,

    /// Garment condition
    pub condition: ItemCondition,

    /// Primary color
    pub color: String,

    /// Brand, if known
    pub brand: Option<String>,

    /// Free-form search tags, lowercased
    pub tags: Vec<String>,

    /// Points value, computed once at creation
    pub point_value: i64,

    /// Owning user
    pub owner_id: Uuid,

    /// Availability state
    pub status: ItemStatus,

    /// Whether moderation has approved the listing
    pub is_approved: bool,

    /// Moderation rejection reason, if rejected
    pub rejection_reason: Option<String>,

    /// Timestamp when the item was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the item was last updated
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new unapproved listing owned by `owner_id`
    ///
    /// The point value is computed here from condition and brand and
    /// stays fixed until the item is edited.
    pub fn new(owner_id: Uuid, input: NewItem) -> Self {
        let now = Utc::now();
        let point_value = compute_point_value(input.condition, input.brand.as_deref());
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            size: input.size,
            condition: input.condition,
            color: input.color,
            brand: input.brand,
            tags: input.tags.into_iter().map(|t| t.to_lowercase()).collect(),
            point_value,
            owner_id,
            status: ItemStatus::Available,
            is_approved: false,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an edit, recomputing the point value and resetting approval
    pub fn apply_edit(&mut self, input: NewItem) {
        self.point_value = compute_point_value(input.condition, input.brand.as_deref());
        self.title = input.title;
        self.description = input.description;
        self.category = input.category;
        self.size = input.size;
        self.condition = input.condition;
        self.color = input.color;
        self.brand = input.brand;
        self.tags = input.tags.into_iter().map(|t| t.to_lowercase()).collect();
        self.is_approved = false;
        self.rejection_reason = None;
        self.updated_at = Utc::now();
    }

    /// Marks the listing as approved by moderation
    pub fn approve(&mut self) {
        self.is_approved = true;
        self.rejection_reason = None;
        self.updated_at = Utc::now();
    }

    /// Marks the listing as rejected by moderation
    pub fn reject(&mut self, reason: String) {
        self.is_approved = false;
        self.status = ItemStatus::Rejected;
        self.rejection_reason = Some(reason);
        self.updated_at = Utc::now();
    }

    /// Moves the item to a new availability state
    pub fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Whether the item can be the subject of a new swap request
    pub fn is_swappable(&self) -> bool {
        self.status == ItemStatus::Available && self.is_approved
    }

    /// Whether the item belongs to the given user
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Brands that raise the computed point value
const PREMIUM_BRANDS: [&str; 7] = ["nike", "adidas", "gucci", "prada", "levi", "zara", "h&m"];

/// Compute the point value of a listing from condition and brand
///
/// Base value 10, scaled by condition, with a premium-brand multiplier.
pub fn compute_point_value(condition: ItemCondition, brand: Option<&str>) -> i64 {
    let mut value: f64 = 10.0;

    value *= match condition {
        ItemCondition::New => 2.0,
        ItemCondition::LikeNew => 1.5,
        ItemCondition::Good => 1.2,
        ItemCondition::Fair => 1.0,
    };

    if let Some(brand) = brand {
        if PREMIUM_BRANDS.contains(&brand.to_lowercase().as_str()) {
            value *= 1.3;
        }
    }

    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input(condition: ItemCondition, brand: Option<&str>) -> NewItem {
        NewItem {
            title: "Denim jacket".to_string(),
            description: "Lightly worn denim jacket".to_string(),
            category: ItemCategory::Outerwear,
            size: ItemSize::M,
            condition,
            color: "blue".to_string(),
            brand: brand.map(String::from),
            tags: vec!["Denim".to_string(), "JACKET".to_string()],
        }
    }

    #[test]
    fn test_point_value_by_condition() {
        assert_eq!(compute_point_value(ItemCondition::New, None), 20);
        assert_eq!(compute_point_value(ItemCondition::LikeNew, None), 15);
        assert_eq!(compute_point_value(ItemCondition::Good, None), 12);
        assert_eq!(compute_point_value(ItemCondition::Fair, None), 10);
    }

    #[test]
    fn test_point_value_premium_brand() {
        assert_eq!(compute_point_value(ItemCondition::New, Some("Nike")), 26);
        assert_eq!(compute_point_value(ItemCondition::Fair, Some("LEVI")), 13);
        // Unknown brands get no multiplier
        assert_eq!(compute_point_value(ItemCondition::Fair, Some("acme")), 10);
    }

    #[test]
    fn test_new_item_starts_unapproved_and_available() {
        let owner = Uuid::new_v4();
        let item = Item::new(owner, sample_input(ItemCondition::Good, None));

        assert_eq!(item.status, ItemStatus::Available);
        assert!(!item.is_approved);
        assert!(!item.is_swappable());
        assert!(item.is_owned_by(owner));
        assert_eq!(item.point_value, 12);
    }

    #[test]
    fn test_tags_are_lowercased() {
        let item = Item::new(Uuid::new_v4(), sample_input(ItemCondition::Good, None));
        assert_eq!(item.tags, vec!["denim", "jacket"]);
    }

    #[test]
    fn test_approval_makes_item_swappable() {
        let mut item = Item::new(Uuid::new_v4(), sample_input(ItemCondition::Good, None));
        item.approve();

        assert!(item.is_approved);
        assert!(item.is_swappable());
    }

    #[test]
    fn test_edit_resets_approval_and_recomputes_value() {
        let mut item = Item::new(Uuid::new_v4(), sample_input(ItemCondition::Fair, None));
        item.approve();
        assert_eq!(item.point_value, 10);

        item.apply_edit(sample_input(ItemCondition::New, Some("gucci")));

        assert!(!item.is_approved);
        assert_eq!(item.point_value, 26);
    }

    #[test]
    fn test_moderation_reject() {
        let mut item = Item::new(Uuid::new_v4(), sample_input(ItemCondition::Good, None));
        item.reject("Stained beyond fair condition".to_string());

        assert_eq!(item.status, ItemStatus::Rejected);
        assert!(!item.is_swappable());
        assert!(item.rejection_reason.is_some());
    }

    #[test]
    fn test_locked_item_is_not_swappable() {
        let mut item = Item::new(Uuid::new_v4(), sample_input(ItemCondition::Good, None));
        item.approve();
        item.set_status(ItemStatus::Pending);

        assert!(!item.is_swappable());
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            ItemStatus::Available,
            ItemStatus::Pending,
            ItemStatus::Swapped,
            ItemStatus::Rejected,
        ] {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ItemStatus::parse("archived"), None);
    }

    #[test]
    fn test_condition_serialization() {
        let json = serde_json::to_string(&ItemCondition::LikeNew).unwrap();
        assert_eq!(json, "\"like-new\"");
    }
}
