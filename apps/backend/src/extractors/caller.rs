use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::claims::CallerIdentity;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Pull the token out of an `Authorization` header value.
///
/// `None` means the header is absent (401); anything present but not of the
/// form `<scheme> <token>` with scheme `bearer` (any case, RFC 7235) is an
/// invalid token (403).
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AppError> {
    let value = header_value.ok_or_else(AppError::unauthenticated)?;

    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, rest)| rest.trim())
        .filter(|t| !t.is_empty() && !t.contains(char::is_whitespace))
        .ok_or_else(|| AppError::invalid_token("Malformed authorization header"))?;

    Ok(token)
}

impl FromRequest for CallerIdentity {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let header_value = match req.headers().get(header::AUTHORIZATION) {
                None => None,
                Some(v) => Some(v.to_str().map_err(|_| {
                    security::token_rejected("non_ascii_header");
                    AppError::invalid_token("Malformed authorization header")
                })?),
            };

            let token = bearer_token(header_value).inspect_err(|e| {
                if matches!(e, AppError::InvalidToken { .. }) {
                    security::token_rejected("malformed_header");
                }
            })?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = verify_access_token(token, &state.security).inspect_err(|e| {
                security::token_rejected(&e.message());
            })?;

            Ok(CallerIdentity::from(claims))
        })
    }
}
