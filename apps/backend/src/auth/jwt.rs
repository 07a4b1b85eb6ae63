use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claim names the server always sets itself.
pub const RESERVED_CLAIMS: [&str; 3] = ["email", "iat", "exp"];

/// Claims carried by backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Any other identity fields supplied at issuance.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn epoch_secs(t: SystemTime) -> Result<i64, AppError> {
    let secs = t
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("system clock is before the unix epoch"))?
        .as_secs();
    i64::try_from(secs).map_err(|_| AppError::internal("timestamp out of range"))
}

/// Mint an access token for `email` valid for `security.token_ttl` from `now`.
///
/// `extra` is embedded as additional claims; entries named like a reserved
/// claim are dropped.
pub fn mint_access_token(
    email: &str,
    mut extra: Map<String, Value>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = epoch_secs(now)?;
    let ttl = i64::try_from(security.token_ttl.as_secs())
        .map_err(|_| AppError::config("token lifetime out of range"))?;

    for key in RESERVED_CLAIMS {
        extra.remove(key);
    }

    let claims = Claims {
        email: email.to_string(),
        iat,
        exp: iat.saturating_add(ttl),
        extra,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify `token` against `security` as of `now`.
///
/// Signature and algorithm are checked by `jsonwebtoken` with the configured
/// algorithm pinned; expiry is checked here with zero leeway so a token whose
/// `exp` is T is still valid at T and rejected from T+1.
pub fn verify_access_token_at(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::invalid_token("Invalid token signature")
        }
        jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
            AppError::invalid_token("Invalid token algorithm")
        }
        _ => AppError::invalid_token("Invalid token"),
    })?;

    if claims.exp < epoch_secs(now)? {
        return Err(AppError::invalid_token("Token expired"));
    }

    Ok(claims)
}

/// Verify `token` against the current wall clock.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_access_token_at(token, SystemTime::now(), security)
}
