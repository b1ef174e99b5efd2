//! Secret hashing and verification.
//!
//! Argon2id with a fresh random salt per hash; the output is a
//! self-describing PHC string carrying the algorithm, parameters, salt and
//! digest. Verification recomputes from the embedded salt and compares in
//! constant time.

use crate::config::HashingConfig;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Errors that can occur during secret hashing
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("secret hashing failed: {0}")]
    Hashing(String),
}

/// Service for hashing and verifying account secrets.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Create a password service with the given work factor.
    pub fn new(config: &HashingConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a secret with a freshly generated random salt.
    ///
    /// Hashing the same secret twice yields different strings; the salt is
    /// never reused across calls.
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let secret_hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;

        Ok(secret_hash.to_string())
    }

    /// Verify a secret against a stored hash in constant time.
    ///
    /// A malformed or truncated stored hash verifies as `false`; there is no
    /// error path here that could bypass the caller's credential handling.
    pub fn verify(&self, secret: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        self.argon2
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`hash`](Self::hash) offloaded to a blocking thread so the CPU-bound
    /// work does not stall the cooperative scheduler.
    pub async fn hash_async(&self, secret: &str) -> Result<String, PasswordError> {
        let service = self.clone();
        let secret = secret.to_owned();
        match tokio::task::spawn_blocking(move || service.hash(&secret)).await {
            Ok(result) => result,
            Err(e) => Err(PasswordError::Hashing(e.to_string())),
        }
    }

    /// [`verify`](Self::verify) offloaded to a blocking thread. A cancelled
    /// or panicked offload degrades to `false`, never an unwound panic.
    pub async fn verify_async(&self, secret: &str, stored_hash: &str) -> bool {
        let service = self.clone();
        let secret = secret.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || service.verify(&secret, &stored_hash))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PasswordService {
        // Minimal work factor keeps the suite fast; the parameters are
        // embedded in the PHC string, so verification is unaffected.
        PasswordService::new(&HashingConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let service = service();
        let hash = service.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify("correct horse", &hash));
        assert!(!service.verify("wrong horse", &hash));
    }

    #[test]
    fn test_salt_is_fresh_per_hash() {
        let service = service();
        let first = service.hash("same secret").unwrap();
        let second = service.hash("same secret").unwrap();

        // Non-determinism is required here, not a bug.
        assert_ne!(first, second);
        assert!(service.verify("same secret", &first));
        assert!(service.verify("same secret", &second));
    }

    #[test]
    fn test_malformed_stored_hash_verifies_false() {
        let service = service();

        assert!(!service.verify("anything", ""));
        assert!(!service.verify("anything", "not-a-phc-string"));
        assert!(!service.verify("anything", "$argon2id$v=19$truncated"));

        let hash = service.hash("anything").unwrap();
        let truncated = &hash[..hash.len() / 2];
        assert!(!service.verify("anything", truncated));
    }

    #[test]
    fn test_zero_parallelism_is_rejected() {
        let result = PasswordService::new(&HashingConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 0,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_async_offloads_match_sync_behavior() {
        let service = service();
        let hash = service.hash_async("abcdef").await.unwrap();

        assert!(service.verify_async("abcdef", &hash).await);
        assert!(!service.verify_async("fedcba", &hash).await);
        assert!(!service.verify_async("abcdef", "garbage").await);
    }
}
