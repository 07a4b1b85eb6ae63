//! Verified caller identity attached to a single request.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::jwt::Claims;

/// Identity extracted from a verified access token.
///
/// Only ever built from [`Claims`] that passed signature and expiry checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallerIdentity {
    pub email: String,
    pub expires_at: i64,
    pub extra: Map<String, Value>,
}

impl From<Claims> for CallerIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            expires_at: claims.exp,
            extra: claims.extra,
        }
    }
}
