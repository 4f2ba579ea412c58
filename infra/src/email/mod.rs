//! Email notification sink implementations.
//!
//! Two sinks implement the core `NotificationService` trait: an HTTP
//! mail-API client for production and a logging mock for development
//! and tests. Message subjects and bodies are rendered here from the
//! workflow events.

pub mod mail_api;
pub mod message;
pub mod mock_email;

pub use mail_api::MailApiNotifier;
pub use message::EmailMessage;
pub use mock_email::MockEmailNotifier;
