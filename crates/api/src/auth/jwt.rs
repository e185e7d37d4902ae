//! Access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload that binds
//! an account's public id to an expiry instant. Nothing is persisted: a token
//! is valid exactly when its signature checks out against the configured
//! secret and the current time is strictly before `exp`.
//!
//! Both operations take the current time as a parameter so callers (and
//! tests) decide what "now" means; the expiry comparison is done here rather
//! than by `jsonwebtoken`, which would consult the system clock and apply its
//! own leeway.

use chrono::{DateTime, Duration, Utc};
use cinelog_core::types::{PublicId, Timestamp};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the account's public id, never its row id.
    pub sub: PublicId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    pub token_expiry_mins: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry_mins", &self.token_expiry_mins)
            .finish()
    }
}

/// Default token lifetime in minutes.
pub const DEFAULT_TOKEN_EXPIRY_MINS: i64 = 30;

/// Longest accepted token lifetime in minutes (one year).
pub const MAX_TOKEN_EXPIRY_MINS: i64 = 60 * 24 * 365;

impl JwtConfig {
    /// `None` when the configured minutes do not fit a [`Duration`].
    pub fn token_lifetime(&self) -> Option<Duration> {
        Duration::try_minutes(self.token_expiry_mins)
    }
}

/// A freshly minted token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Reasons a presented token was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, malformed structure, or missing claims.
    #[error("token rejected: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    #[error("token expired at {exp}")]
    Expired { exp: i64 },

    #[error("token lifetime of {minutes} minutes is out of range")]
    LifetimeOutOfRange { minutes: i64 },
}

/// Generate an HS256 access token for the given account, valid from `now`
/// for the configured lifetime.
pub fn generate_access_token(
    public_id: PublicId,
    config: &JwtConfig,
    now: Timestamp,
) -> Result<IssuedToken, TokenError> {
    let expires_at = config
        .token_lifetime()
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::LifetimeOutOfRange {
            minutes: config.token_expiry_mins,
        })?;

    let claims = Claims {
        sub: public_id,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        token,
        expires_at: DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or(expires_at),
    })
}

/// Validate an access token as of `now`, returning the embedded [`Claims`].
///
/// Only HS256 is accepted, `sub` and `exp` must be present, and the token is
/// expired once `now >= exp`.
pub fn validate_token(token: &str, config: &JwtConfig, now: Timestamp) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    let claims = token_data.claims;
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired { exp: claims.exp });
    }
    Ok(claims)
}
