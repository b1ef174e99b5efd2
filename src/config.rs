//! Configuration for the credential core.
//!
//! Settings load from configuration files and `LIBRIS`-prefixed environment
//! variables, with sane defaults underneath. The signing secret is injected
//! here once at startup and never read ad hoc at call time, so tests can run
//! with injected test keys.

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level configuration for the credential core.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub token: TokenConfig,
    pub hashing: HashingConfig,
}

/// Session token settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Server-held HMAC signing key. Never logged and never embedded in
    /// tokens; `Debug` redacts it.
    pub signing_secret: String,
    /// Token validity window. Expired tokens require re-authentication.
    pub validity_hours: i64,
}

/// Argon2id work factor for the secret hasher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            signing_secret: "default-signing-secret-change-in-production".to_string(),
            validity_hours: 24,
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        // The argon2 crate's recommended parameters: 19 MiB, 2 iterations,
        // single lane.
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("signing_secret", &"<redacted>")
            .field("validity_hours", &self.validity_hours)
            .finish()
    }
}

impl AuthConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Configuration files (`config/default`, `config/local`)
    /// 3. Default values (lowest priority)
    pub fn load() -> Result<Self, ConfigError> {
        if std::path::Path::new(".env").exists() {
            dotenvy::dotenv().ok();
        }

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("LIBRIS").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file, with environment overrides.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("LIBRIS").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.token.signing_secret.len() < 32 {
            return Err("signing secret must be at least 32 characters long".to_string());
        }

        if self.token.validity_hours <= 0 {
            return Err("token validity must be a positive number of hours".to_string());
        }

        if self.hashing.memory_kib == 0
            || self.hashing.iterations == 0
            || self.hashing.parallelism == 0
        {
            return Err("hashing parameters must all be nonzero".to_string());
        }

        Ok(())
    }
}
