//! Role-based authorization on verified token claims.
//!
//! The policy is an explicit enumerated set per protected operation. There
//! is no role hierarchy: `Admin` does not satisfy a librarian-only check
//! unless the caller lists both roles. An implicit ordering is exactly the
//! kind of assumption privilege-escalation bugs grow from.

use crate::error::AuthError;
use crate::models::Role;
use crate::token::TokenClaims;

/// Allow iff the claimed role is in the required set.
///
/// An empty set denies: no operation is open to every role implicitly.
pub fn authorize(claims: &TokenClaims, required_roles: &[Role]) -> Result<(), AuthError> {
    if required_roles.contains(&claims.role) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole)
    }
}
