//! HTTP middleware: bearer authentication and CORS.

pub mod auth;
pub mod cors;

pub use auth::{AuthUser, RequireAuth};
pub use cors::create_cors;
