//! Account and role models for the credential core.
//!
//! This module defines the identity record held by the credential store,
//! its public secret-free projection, and the request/response types
//! crossing the service boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account roles understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administration.
    Admin,
    /// Catalog curation staff.
    Librarian,
    /// Regular reader account.
    #[default]
    Member,
}

/// Error returned when parsing a role string outside the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("role must be one of: admin, librarian, member")]
pub struct InvalidRole;

impl Role {
    /// Stable lowercase name used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Librarian => "librarian",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "librarian" => Ok(Role::Librarian),
            "member" => Ok(Role::Member),
            _ => Err(InvalidRole),
        }
    }
}

/// Identity record held by the credential store.
///
/// `Account` deliberately does not implement `Serialize`: the only
/// externally visible shape of an account is [`AccountView`], which has no
/// secret hash field to leak. `Debug` redacts the hash so records can be
/// traced safely.
#[derive(Clone)]
pub struct Account {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// Login key, stored normalized (trimmed, lowercased).
    pub email: String,
    /// PHC string produced by the secret hasher.
    pub secret_hash: String,
    /// Human-readable name, 2-100 characters.
    pub display_name: String,
    pub role: Role,
    /// Inactive accounts must not authenticate.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Set by the store on successful authentication.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new active account with a fresh id.
    pub fn new(email: String, secret_hash: String, display_name: String, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            secret_hash,
            display_name,
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// Public projection with the secret hash stripped by construction.
    pub fn to_view(&self) -> AccountView {
        AccountView {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("secret_hash", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("last_login_at", &self.last_login_at)
            .finish()
    }
}

/// Externally observable account representation.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        account.to_view()
    }
}

/// Registration input.
///
/// An out-of-set role string fails deserialization, so a constructed request
/// always carries a valid role or none; absent means [`Role::Member`].
#[derive(Clone, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub secret: String,
    pub display_name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish()
    }
}

/// Login input.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Successful authentication: the account and its bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub account: AccountView,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_member() {
        assert_eq!(Role::default(), Role::Member);
    }

    #[test]
    fn test_role_round_trips_lowercase() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!("librarian".parse::<Role>().unwrap(), Role::Librarian);
        assert_eq!(" Member ".parse::<Role>().unwrap(), Role::Member);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Librarian).unwrap(), "\"librarian\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }

    #[test]
    fn test_new_account_is_active_with_fresh_id() {
        let account = Account::new(
            "ana@example.com".to_string(),
            "hash".to_string(),
            "Ana".to_string(),
            Role::Member,
        );
        assert!(account.is_active);
        assert!(!account.id.is_empty());
        assert!(account.last_login_at.is_none());

        let other = Account::new(
            "ben@example.com".to_string(),
            "hash".to_string(),
            "Ben".to_string(),
            Role::Member,
        );
        assert_ne!(account.id, other.id);
    }

    #[test]
    fn test_view_carries_no_secret_hash() {
        let account = Account::new(
            "ana@example.com".to_string(),
            "$argon2id$v=19$secret".to_string(),
            "Ana".to_string(),
            Role::Librarian,
        );
        let json = serde_json::to_value(account.to_view()).unwrap();
        assert!(json.get("secret_hash").is_none());
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["role"], "librarian");
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let account = Account::new(
            "ana@example.com".to_string(),
            "$argon2id$v=19$secret".to_string(),
            "Ana".to_string(),
            Role::Member,
        );
        let rendered = format!("{:?}", account);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("argon2id"));

        let credentials = Credentials {
            email: "ana@example.com".to_string(),
            secret: "abcdef".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("abcdef"));
    }

    #[test]
    fn test_registration_request_deserializes_with_optional_role() {
        let with_role: RegistrationRequest = serde_json::from_str(
            r#"{"email":"a@b.com","secret":"abcdef","display_name":"Ana","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(with_role.role, Some(Role::Admin));

        let without_role: RegistrationRequest =
            serde_json::from_str(r#"{"email":"a@b.com","secret":"abcdef","display_name":"Ana"}"#)
                .unwrap();
        assert_eq!(without_role.role, None);

        let bad_role = serde_json::from_str::<RegistrationRequest>(
            r#"{"email":"a@b.com","secret":"abcdef","display_name":"Ana","role":"root"}"#,
        );
        assert!(bad_role.is_err());
    }
}
