//! Error taxonomy for the credential core.
//!
//! Every fallible boundary operation returns [`AuthError`]; the embedding
//! transport layer maps variants to status codes. No variant's message ever
//! carries a plaintext secret, a salt, or the signing key.

use thiserror::Error;

/// A rejected input field and the constraint it violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {constraint}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The constraint that was violated, phrased for the end user.
    pub constraint: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, constraint: &'static str) -> Self {
        Self { field, constraint }
    }
}

/// Errors surfaced by the credential core's boundary operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Input failed a shape or range check; the message names the field
    /// and the violated constraint.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An account with the given email already exists.
    #[error("an account with this email already exists")]
    DuplicateAccount,

    /// Unknown email, wrong secret, or inactive account. One undistinguished
    /// value so callers cannot enumerate accounts.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Structurally malformed token or signature mismatch.
    #[error("invalid token")]
    InvalidToken,

    /// Well-signed token past its expiry; re-authentication required.
    #[error("token expired")]
    TokenExpired,

    /// The credential store could not be reached. The only variant eligible
    /// for caller-side retry, and only for idempotent lookups.
    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// Verified claims carry a role outside the required set.
    #[error("role is not permitted to perform this operation")]
    InsufficientRole,

    /// Unexpected hashing or signing fault; never a panic.
    #[error("internal error: {0}")]
    Internal(String),
}
