//! Token Service
//!
//! Issues and verifies HS256-signed identity tokens with a fixed absolute
//! expiry. There is no refresh: callers re-issue after expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::{PlatformError, Result};

/// Token verification failure. Kept distinct so callers can tell a stale
/// token from a forged or malformed one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token expired")]
    Expired,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret
    pub secret_key: String,
    pub access_token_expiry_secs: i64,
}

impl AuthConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            access_token_expiry_secs: 3600,
        }
    }

    pub fn with_expiry_secs(mut self, secs: i64) -> Self {
        self.access_token_expiry_secs = secs;
        self
    }
}

/// Claims submitted by the client when requesting a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub email: String,

    /// Any other submitted claims, carried opaquely
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Signed claim set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_secs: i64,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is absolute
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
            expiry_secs: config.access_token_expiry_secs,
        }
    }

    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Sign the submitted claims with an expiry relative to now
    pub fn issue_token(&self, request: TokenRequest) -> Result<String> {
        if request.email.trim().is_empty() {
            return Err(PlatformError::validation("email claim is required"));
        }

        let mut extra = request.extra;
        // Reserved, set by the service
        for reserved in ["email", "iat", "exp"] {
            extra.remove(reserved);
        }

        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            email: request.email,
            iat: now,
            exp: now + self.expiry_secs,
            extra,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| PlatformError::Internal {
                message: format!("Failed to sign token: {}", e),
            })?;

        debug!(email = %claims.email, exp = claims.exp, "Issued access token");
        Ok(token)
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify_token(&self, token: &str) -> std::result::Result<AccessTokenClaims, TokenError> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                kind => TokenError::Invalid(format!("{:?}", kind)),
            })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
