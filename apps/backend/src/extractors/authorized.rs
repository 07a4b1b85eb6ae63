use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::claims::CallerIdentity;
use crate::auth::gate::{authorize, AccessDecision, DenyReason, UserRecord};
use crate::auth::roles::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Type-level name for the role a route requires.
pub trait RequiredRole: 'static {
    const ROLE: Role;
}

pub struct Admin;
pub struct DeliveryMan;

impl RequiredRole for Admin {
    const ROLE: Role = Role::Admin;
}

impl RequiredRole for DeliveryMan {
    const ROLE: Role = Role::DeliveryMan;
}

/// A verified caller whose current user record holds `R::ROLE`.
///
/// Token verification runs first; the privilege check (one user lookup)
/// only runs if it succeeded. Taking this as a handler argument means the
/// handler body executes only for allowed callers.
#[derive(Debug)]
pub struct Authorized<R: RequiredRole> {
    pub identity: CallerIdentity,
    pub user: UserRecord,
    _role: PhantomData<R>,
}

impl<R: RequiredRole> FromRequest for Authorized<R> {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let identity = CallerIdentity::from_request(&req, &mut Payload::None).await?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            match authorize(state.db(), &identity, R::ROLE).await? {
                AccessDecision::Allow(user) => Ok(Authorized {
                    identity,
                    user,
                    _role: PhantomData,
                }),
                AccessDecision::Deny(reason) => {
                    security::access_denied(&identity.email, R::ROLE.as_str(), reason.as_str());
                    let code = match reason {
                        DenyReason::UnknownUser => ErrorCode::ForbiddenUserNotFound,
                        DenyReason::InsufficientRole { .. } => ErrorCode::InsufficientRole,
                    };
                    Err(AppError::forbidden_with_code(
                        code,
                        format!("{} role required", R::ROLE),
                    ))
                }
            }
        })
    }
}
