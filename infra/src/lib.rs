//! # Infrastructure Layer
//!
//! Concrete implementations of the interfaces the core crate defines:
//! MySQL repositories over SQLx, the outbound email notification sink,
//! and the JWT credential-service adapter. Nothing in here contains
//! business rules; the workflow semantics live in `rw_core`.

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - notification sink implementations
pub mod email;

/// Auth module - credential service adapter
pub mod auth;
