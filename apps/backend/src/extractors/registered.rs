use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::claims::CallerIdentity;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::app_state::AppState;

/// A verified caller with a user record, whatever its role.
#[derive(Debug)]
pub struct RegisteredUser {
    pub identity: CallerIdentity,
    pub user: User,
}

impl FromRequest for RegisteredUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let identity = CallerIdentity::from_request(&req, &mut Payload::None).await?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            match users::find_by_email(state.db(), &identity.email).await? {
                Some(user) => Ok(RegisteredUser { identity, user }),
                None => {
                    security::access_denied(&identity.email, "registered", "unknown_user");
                    Err(AppError::forbidden_with_code(
                        ErrorCode::ForbiddenUserNotFound,
                        "No registered user for this token",
                    ))
                }
            }
        })
    }
}
