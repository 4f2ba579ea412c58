//! Business services containing domain logic and use cases.

pub mod catalog;
pub mod credentials;
pub mod item;
pub mod ledger;
pub mod notification;
pub mod stats;
pub mod swap;

// Re-export commonly used types
pub use catalog::CatalogService;
pub use credentials::{CredentialService, MockCredentialService};
pub use item::ItemService;
pub use ledger::PointsLedger;
pub use notification::{NotificationError, NotificationService};
pub use stats::{PlatformStats, StatsService};
pub use swap::{CreateSwapInput, SwapService};
