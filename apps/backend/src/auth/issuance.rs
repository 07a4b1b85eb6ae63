//! Token issuance for registered users.

use std::time::SystemTime;

use serde_json::{Map, Value};

use crate::auth::gate::UserDirectory;
use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;
use crate::utils::email::parse_email;

/// Issue an access token for the identity payload `body`.
///
/// `body.email` is normalised and must belong to a registered user; the
/// remaining fields are embedded as extra claims. The directory is consulted
/// once.
pub async fn issue_token<D>(
    directory: &D,
    mut body: Map<String, Value>,
    now: SystemTime,
    security_config: &SecurityConfig,
) -> Result<String, AppError>
where
    D: UserDirectory + ?Sized,
{
    let raw_email = match body.remove("email") {
        Some(Value::String(s)) => s,
        _ => {
            return Err(AppError::bad_request(
                ErrorCode::ValidationError,
                "email is required",
            ))
        }
    };
    let email = parse_email(&raw_email)?;

    if directory.find_by_email(&email).await?.is_none() {
        security::issuance_refused(&email);
        return Err(AppError::forbidden_with_code(
            ErrorCode::ForbiddenUserNotFound,
            "No registered user for this email",
        ));
    }

    mint_access_token(&email, body, now, security_config)
}
