//! # ReWear Shared
//!
//! Cross-cutting types shared by every layer of the ReWear backend:
//! the API response envelope, pagination helpers, and configuration
//! structures. This crate holds no domain knowledge.

pub mod config;
pub mod types;
