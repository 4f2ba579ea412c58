//! Credential service adapter.

pub mod jwt_credentials;

pub use jwt_credentials::JwtCredentialService;
