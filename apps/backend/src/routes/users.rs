use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::claims::CallerIdentity;
use crate::auth::roles::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{Admin, Authorized, JsonBody, ResourceId, ValidatedJson};
use crate::repos::users;
use crate::services::users::{self as user_service, RegisterUser};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RegisterResponse {
    id: Uuid,
    inserted: bool,
}

#[derive(Debug, Deserialize)]
struct RoleChange {
    role: String,
}

async fn register_user(
    app_state: web::Data<AppState>,
    body: ValidatedJson<RegisterUser>,
) -> Result<HttpResponse, AppError> {
    let (user, inserted) = user_service::register(app_state.db(), body.into_inner()).await?;
    let response = RegisterResponse {
        id: user.id,
        inserted,
    };

    if inserted {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

async fn me(
    caller: CallerIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::find_by_email(app_state.db(), &caller.email)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not registered"))?;
    Ok(HttpResponse::Ok().json(user))
}

async fn list_users(
    _admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let all = users::list_all(app_state.db()).await?;
    Ok(HttpResponse::Ok().json(all))
}

async fn list_delivery_men(
    _admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let delivery_men = users::list_by_role(app_state.db(), Role::DeliveryMan).await?;
    Ok(HttpResponse::Ok().json(delivery_men))
}

async fn change_role(
    admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    let change: RoleChange = body.parse()?;
    let role: Role = change.role.parse()?;

    let user = user_service::change_role(app_state.db(), id, role).await?;
    info!(user_id = %id, %role, changed_by = %admin.user.id, "user role changed");

    Ok(HttpResponse::Ok().json(user))
}

async fn delete_user(
    admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();

    user_service::remove(app_state.db(), id).await?;
    info!(user_id = %id, deleted_by = %admin.user.id, "user deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(register_user))
            .route(web::get().to(list_users)),
    )
    .service(web::resource("/me").route(web::get().to(me)))
    .service(web::resource("/delivery-men").route(web::get().to(list_delivery_men)))
    .service(web::resource("/{id}/role").route(web::patch().to(change_role)))
    .service(web::resource("/{id}").route(web::delete().to(delete_user)));
}
