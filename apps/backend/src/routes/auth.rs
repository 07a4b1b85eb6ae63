use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::issuance::issue_token;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange an identity payload (`{email, ...}`) for an access token.
///
/// Reachable without a bearer token; only registered emails are served.
async fn create_token(
    app_state: web::Data<AppState>,
    body: ValidatedJson<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let token = issue_token(
        app_state.db(),
        body.into_inner(),
        SystemTime::now(),
        &app_state.security,
    )
    .await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/jwt", web::post().to(create_token));
}
