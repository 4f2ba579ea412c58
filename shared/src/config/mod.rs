//! Configuration structures for the ReWear backend.
//!
//! Each subsystem owns a typed config struct. Values are loaded from
//! environment variables at startup (`from_env`) with sensible defaults,
//! and injected explicitly rather than read from module-level globals.

pub mod auth;
pub mod database;
pub mod notification;
pub mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use notification::NotificationConfig;
pub use server::ServerConfig;
