//! libris-auth: credential issuance and verification core for the Libris
//! library platform.
//!
//! This crate owns the security-sensitive slice of the platform:
//! - Registration with salted adaptive secret hashing
//! - Authentication with enumeration-resistant failures
//! - Signed, stateless, time-bounded session tokens
//! - Role-based authorization on verified claims
//!
//! Catalog data, HTTP routing, and UI live elsewhere; the embedding layer
//! plugs in an [`AccountStore`] and maps [`AuthError`] values to its own
//! status codes.

pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod observability;
pub mod password;
pub mod service;
pub mod store;
pub mod token;
pub mod validate;

// Re-export commonly used types for convenience
pub use config::{AuthConfig, HashingConfig, TokenConfig};
pub use error::{AuthError, ValidationError};
pub use models::{Account, AccountView, AuthSession, Credentials, RegistrationRequest, Role};
pub use password::PasswordService;
pub use service::AuthService;
pub use store::{AccountStore, MemoryAccountStore, StoreError};
pub use token::{TokenClaims, TokenService};
