//! Credential store adapter boundary.
//!
//! The production account store lives with the catalog service; this crate
//! only defines the contract it must satisfy, plus an in-memory
//! implementation for tests and in-process deployments.

use crate::models::Account;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by a credential store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The authoritative duplicate guard: creating an account whose email
    /// already exists, regardless of what an earlier lookup said.
    #[error("account email already exists")]
    UniquenessViolation,

    /// Timeout, connection loss, or any other I/O failure. Retry-eligible
    /// for lookups only.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for account records.
///
/// Emails passed in are expected to be normalized (trimmed, lowercased);
/// implementations enforce email uniqueness case-insensitively and must make
/// `create` atomic, so a cancelled registration leaves nothing visible.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account, or fail with
    /// [`StoreError::UniquenessViolation`] if the email is taken.
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Record a successful authentication timestamp.
    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Replace an account's secret hash.
    async fn update_secret_hash(&self, id: &str, secret_hash: String) -> Result<(), StoreError>;
}

/// In-memory account store for tests and development.
///
/// Keyed by normalized email, so uniqueness is case-insensitive and the
/// check-and-insert in `create` is atomic under the write lock.
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(StoreError::UniquenessViolation);
        }
        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.values_mut().find(|a| a.id == id) {
            account.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn update_secret_hash(&self, id: &str, secret_hash: String) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.values_mut().find(|a| a.id == id) {
            account.secret_hash = secret_hash;
        }
        Ok(())
    }
}
