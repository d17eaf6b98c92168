//! JWT token creation for development and tests.
//!
//! Production tokens come from the identity provider; this encoder signs
//! tokens with the same secret so the service can be driven locally.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use fmgr_core::config::AuthConfig;
use fmgr_core::error::{AppError, ErrorKind};
use fmgr_entity::user::Identity;

use super::claims::Claims;

/// Creates signed identity tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: i64::try_from(config.token_ttl_minutes).unwrap_or(i64::MAX / 60_000),
        }
    }

    /// Issue a token for `identity` with the configured TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        self.issue_with_ttl(identity, Duration::minutes(self.ttl_minutes))
    }

    /// Issue a token for `identity` that expires after `ttl`.
    pub fn issue_with_ttl(&self, identity: &Identity, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            picture: identity.image.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to encode token", e)
        })
    }
}
