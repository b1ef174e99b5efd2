//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the account id and role, time-bounded by
//! a fixed validity window. Verification is stateless: no store lookup on
//! the hot path, every check is pure CPU over the server-held signing key.

use crate::config::TokenConfig;
use crate::models::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the account id.
    pub sub: String,
    /// Role at issuance time.
    pub role: Role,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Errors that can occur during token operations
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token creation failed: {0}")]
    Creation(String),

    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,
}

/// Issues and verifies signed session tokens.
///
/// The signing key is derived once at construction and never appears in
/// claims, errors, or `Debug` output.
pub struct TokenService {
    validity_hours: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            validity_hours: config.validity_hours,
            encoding_key: EncodingKey::from_secret(config.signing_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.signing_secret.as_bytes()),
        }
    }

    /// Issue a signed token for the given subject and role.
    pub fn issue(&self, subject_id: &str, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.validity_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed or tampered tokens fail with [`TokenError::Invalid`]; a
    /// well-signed token past its expiry fails with [`TokenError::Expired`].
    /// Expiry is exact, with no leeway; renewal requires re-authentication.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        Ok(token_data.claims)
    }
}
