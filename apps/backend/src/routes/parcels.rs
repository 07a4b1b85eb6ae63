use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::claims::CallerIdentity;
use crate::domain::parcels::parse_status;
use crate::entities::parcels::ParcelStatus;
use crate::error::AppError;
use crate::extractors::{Admin, Authorized, DeliveryMan, JsonBody, RegisteredUser, ResourceId};
use crate::repos::parcels;
use crate::services::parcels::{self as parcel_service, ParcelInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct StatusFilter {
    status: Option<String>,
}

impl StatusFilter {
    fn parsed(&self) -> Result<Option<ParcelStatus>, AppError> {
        Ok(self.status.as_deref().map(parse_status).transpose()?)
    }
}

#[derive(Debug, Deserialize)]
struct AssignRequest {
    delivery_man_id: Uuid,
    approximate_delivery_date: String,
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: String,
}

async fn book_parcel(
    caller: RegisteredUser,
    app_state: web::Data<AppState>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let input: ParcelInput = body.parse()?;
    let parcel = parcel_service::book(app_state.db(), &caller.user, input).await?;
    Ok(HttpResponse::Created().json(parcel))
}

async fn my_parcels(
    caller: CallerIdentity,
    app_state: web::Data<AppState>,
    query: web::Query<StatusFilter>,
) -> Result<HttpResponse, AppError> {
    let status = query.parsed()?;
    let mine = parcels::list_by_owner(app_state.db(), &caller.email, status).await?;
    Ok(HttpResponse::Ok().json(mine))
}

async fn all_parcels(
    _admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
    query: web::Query<StatusFilter>,
) -> Result<HttpResponse, AppError> {
    let status = query.parsed()?;
    let all = parcels::list_all(app_state.db(), status).await?;
    Ok(HttpResponse::Ok().json(all))
}

async fn assigned_parcels(
    delivery_man: Authorized<DeliveryMan>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let assigned = parcels::list_assigned(app_state.db(), delivery_man.user.id).await?;
    Ok(HttpResponse::Ok().json(assigned))
}

async fn edit_parcel(
    caller: CallerIdentity,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    let input: ParcelInput = body.parse()?;
    let parcel = parcel_service::edit(app_state.db(), &caller.email, id, input).await?;
    Ok(HttpResponse::Ok().json(parcel))
}

async fn cancel_parcel(
    caller: CallerIdentity,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    let parcel = parcel_service::cancel(app_state.db(), &caller.email, id).await?;
    Ok(HttpResponse::Ok().json(parcel))
}

async fn assign_parcel(
    _admin: Authorized<Admin>,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    let req: AssignRequest = body.parse()?;
    let parcel = parcel_service::assign(
        app_state.db(),
        id,
        req.delivery_man_id,
        req.approximate_delivery_date,
    )
    .await?;
    Ok(HttpResponse::Ok().json(parcel))
}

async fn record_outcome(
    delivery_man: Authorized<DeliveryMan>,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let id = ResourceId::parse(&path)?.into_inner();
    let req: StatusRequest = body.parse()?;
    let outcome = parse_status(&req.status)?;
    let parcel =
        parcel_service::record_delivery_outcome(app_state.db(), &delivery_man.user, id, outcome)
            .await?;
    Ok(HttpResponse::Ok().json(parcel))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments are registered before `/{id}` so they are not captured by it.
    cfg.service(
        web::resource("")
            .route(web::post().to(book_parcel))
            .route(web::get().to(all_parcels)),
    )
    .service(web::resource("/mine").route(web::get().to(my_parcels)))
    .service(web::resource("/assigned").route(web::get().to(assigned_parcels)))
    .service(web::resource("/{id}/cancel").route(web::patch().to(cancel_parcel)))
    .service(web::resource("/{id}/assign").route(web::patch().to(assign_parcel)))
    .service(web::resource("/{id}/status").route(web::patch().to(record_outcome)))
    .service(web::resource("/{id}").route(web::patch().to(edit_parcel)));
}
