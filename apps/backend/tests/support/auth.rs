//! JWT helpers for tests

use std::time::{Duration, SystemTime};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parcel_backend::auth::jwt::{mint_access_token, Claims};
use parcel_backend::SecurityConfig;
use serde_json::Map;

/// Bearer token for `email`, valid for the configured lifetime.
pub fn mint_test_token(email: &str, sec: &SecurityConfig) -> String {
    mint_access_token(email, Map::new(), SystemTime::now(), sec)
        .expect("should mint token successfully")
}

/// Full `Authorization` header value for `email`.
pub fn bearer_header(email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(email, sec))
}

/// Token issued two hours ago with a one-hour lifetime.
pub fn mint_expired_token(email: &str, sec: &SecurityConfig) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(7200))
        .expect("clock should allow subtraction");
    mint_access_token(email, Map::new(), past, sec).expect("should mint expired token")
}

/// Token for `email` signed with a different secret.
pub fn mint_foreign_token(email: &str) -> String {
    let other = SecurityConfig::new("some-other-secret-not-ours-0123");
    mint_test_token(email, &other)
}

/// Token signed with the right secret but HS512 instead of HS256.
pub fn mint_wrong_algorithm_token(email: &str, sec: &SecurityConfig) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs() as i64;
    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp: now + 600,
        extra: Map::new(),
    };
    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(&sec.jwt_secret),
    )
    .expect("should encode HS512 token")
}
