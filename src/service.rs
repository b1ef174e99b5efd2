//! The credential core's inbound boundary: registration, authentication,
//! token verification with authorization, and credential update.
//!
//! Each operation is a short-lived unit of work invoked per request. The
//! only process-wide state is the signing key (read-only after
//! construction) and the external store; there is nothing to lock here.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard;
use crate::models::{Account, AccountView, AuthSession, Credentials, RegistrationRequest, Role};
use crate::password::{PasswordError, PasswordService};
use crate::store::{AccountStore, StoreError};
use crate::token::{TokenClaims, TokenError, TokenService};
use crate::validate;
use chrono::Utc;
use tracing::{debug, info};

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            // The store is the authoritative uniqueness guard; a violation
            // it reports is a duplicate account, wherever it surfaces.
            StoreError::UniquenessViolation => AuthError::DuplicateAccount,
            StoreError::Unavailable(reason) => AuthError::StoreUnavailable(reason),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Creation(reason) => AuthError::Internal(reason),
        }
    }
}

/// Credential issuance and verification service.
///
/// Generic over the account store so the embedding application can plug in
/// its own persistence while tests run against
/// [`MemoryAccountStore`](crate::store::MemoryAccountStore).
pub struct AuthService<S: AccountStore> {
    store: S,
    passwords: PasswordService,
    tokens: TokenService,
    /// A throwaway hash verified on unknown-email attempts, so a miss costs
    /// the same CPU as a mismatch and lookup timing cannot enumerate
    /// accounts. Hashed from a random string at construction.
    miss_hash: String,
}

impl<S: AccountStore> AuthService<S> {
    /// Create a service from already-built components.
    pub fn new(
        store: S,
        passwords: PasswordService,
        tokens: TokenService,
    ) -> Result<Self, AuthError> {
        let miss_hash = passwords.hash(&uuid::Uuid::new_v4().to_string())?;
        Ok(Self {
            store,
            passwords,
            tokens,
            miss_hash,
        })
    }

    /// Create a service with components built from configuration.
    pub fn from_config(store: S, config: &AuthConfig) -> Result<Self, AuthError> {
        let passwords = PasswordService::new(&config.hashing)?;
        let tokens = TokenService::new(&config.token);
        Self::new(store, passwords, tokens)
    }

    /// Register a new account.
    ///
    /// Check-then-create is not atomic; if a concurrent registration wins
    /// the race, the store's uniqueness violation is reported as the same
    /// [`AuthError::DuplicateAccount`] the lookup would have produced.
    pub async fn register(&self, request: RegistrationRequest) -> Result<AccountView, AuthError> {
        validate::validate_registration(&request)?;

        let email = validate::normalize_email(&request.email);
        if self.store.find_by_email(&email).await?.is_some() {
            debug!("registration rejected: email already taken");
            return Err(AuthError::DuplicateAccount);
        }

        let secret_hash = self.passwords.hash_async(&request.secret).await?;
        let account = Account::new(
            email,
            secret_hash,
            request.display_name.trim().to_string(),
            request.role.unwrap_or_default(),
        );

        let created = self.store.create(account).await?;
        info!(account_id = %created.id, role = %created.role, "account registered");
        Ok(created.to_view())
    }

    /// Authenticate and issue a session token.
    ///
    /// Unknown email, wrong secret, and inactive account all produce the
    /// same [`AuthError::InvalidCredentials`], in comparable time.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<AuthSession, AuthError> {
        let account = self.verify_credentials(&credentials).await?;

        let now = Utc::now();
        self.store.touch_last_login(&account.id, now).await?;
        let token = self.tokens.issue(&account.id, account.role)?;

        let mut view = account.to_view();
        view.last_login_at = Some(now);

        info!(account_id = %account.id, "authentication succeeded");
        Ok(AuthSession {
            account: view,
            token,
        })
    }

    /// Verify a bearer token and check its role against the required set.
    ///
    /// Stateless and I/O-free: this runs on the hot path of every protected
    /// request.
    pub fn verify_and_authorize(
        &self,
        token: &str,
        required_roles: &[Role],
    ) -> Result<TokenClaims, AuthError> {
        let claims = self.tokens.verify(token)?;
        guard::authorize(&claims, required_roles)?;
        Ok(claims)
    }

    /// Replace an account's secret after re-verifying the current one.
    ///
    /// Tokens already issued stay valid until expiry; this core keeps no
    /// revocation state.
    pub async fn change_secret(
        &self,
        credentials: Credentials,
        new_secret: &str,
    ) -> Result<(), AuthError> {
        validate::validate_secret(new_secret)?;

        let account = self.verify_credentials(&credentials).await?;
        let secret_hash = self.passwords.hash_async(new_secret).await?;
        self.store
            .update_secret_hash(&account.id, secret_hash)
            .await?;

        info!(account_id = %account.id, "account secret updated");
        Ok(())
    }

    /// Shared steps of authentication: lookup, secret check, active check.
    ///
    /// The inactive check runs after verification so an inactive account
    /// costs the same work as an active one with a wrong secret.
    async fn verify_credentials(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        let email = validate::normalize_email(&credentials.email);

        let account = match self.store.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                // Burn the same hashing cost as a real mismatch.
                let _ = self
                    .passwords
                    .verify_async(&credentials.secret, &self.miss_hash)
                    .await;
                debug!("authentication rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .passwords
            .verify_async(&credentials.secret, &account.secret_hash)
            .await
        {
            debug!(account_id = %account.id, "authentication rejected: secret mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active {
            debug!(account_id = %account.id, "authentication rejected: inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account)
    }
}
