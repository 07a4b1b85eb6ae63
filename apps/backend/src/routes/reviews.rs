use actix_web::{web, HttpResponse};
use tracing::info;

use crate::auth::claims::CallerIdentity;
use crate::error::AppError;
use crate::extractors::{Admin, Authorized, JsonBody, RegisteredUser, ResourceId};
use crate::repos::reviews;
use crate::services::reviews::{self as review_service, ReviewInput};
use crate::state::app_state::AppState;

async fn create_review(
    caller: RegisteredUser,
    app_state: web::Data<AppState>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let input: ReviewInput = body.parse()?;
    let review = review_service::create(app_state.db(), &caller.user, input).await?;
    Ok(HttpResponse::Created().json(review))
}

async fn reviews_for_delivery_man(
    _caller: CallerIdentity,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    let list = reviews::list_for_delivery_man(app_state.db(), id).await?;
    Ok(HttpResponse::Ok().json(list))
}

async fn delete_review(
    admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    reviews::delete(app_state.db(), id).await?;
    info!(review_id = %id, deleted_by = %admin.user.id, "review deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_review)))
        .service(
            web::resource("/delivery-man/{id}").route(web::get().to(reviews_for_delivery_man)),
        )
        .service(web::resource("/{id}").route(web::delete().to(delete_review)));
}
