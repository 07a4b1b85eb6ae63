//! Parcel repository functions.
//!
//! Mutations return the affected row count; services decide what zero means.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::parcels_sea as parcels_adapter;
use crate::entities::parcels::ParcelStatus;
use crate::errors::domain::DomainError;

pub use parcels_adapter::{ParcelCreate, ParcelDetailsUpdate};

/// Parcel domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parcel {
    pub id: Uuid,
    pub owner_email: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub parcel_type: String,
    pub weight_kg: f64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub delivery_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub requested_delivery_date: String,
    pub price: f64,
    pub status: ParcelStatus,
    pub delivery_man_id: Option<Uuid>,
    pub approximate_delivery_date: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub booked_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParcelCreate,
) -> Result<Parcel, DomainError> {
    let parcel = parcels_adapter::insert(conn, dto).await?;
    Ok(Parcel::from(parcel))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Parcel>, DomainError> {
    let parcel = parcels_adapter::find_by_id(conn, id).await?;
    Ok(parcel.map(Parcel::from))
}

pub async fn list_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_email: &str,
    status: Option<ParcelStatus>,
) -> Result<Vec<Parcel>, DomainError> {
    let parcels = parcels_adapter::list_by_owner(conn, owner_email, status).await?;
    Ok(parcels.into_iter().map(Parcel::from).collect())
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: Option<ParcelStatus>,
) -> Result<Vec<Parcel>, DomainError> {
    let parcels = parcels_adapter::list_all(conn, status).await?;
    Ok(parcels.into_iter().map(Parcel::from).collect())
}

pub async fn list_assigned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    delivery_man_id: Uuid,
) -> Result<Vec<Parcel>, DomainError> {
    let parcels = parcels_adapter::list_assigned(conn, delivery_man_id).await?;
    Ok(parcels.into_iter().map(Parcel::from).collect())
}

pub async fn update_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    dto: ParcelDetailsUpdate,
) -> Result<u64, DomainError> {
    Ok(parcels_adapter::update_details(conn, id, dto).await?)
}

pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    from: ParcelStatus,
    to: ParcelStatus,
) -> Result<u64, DomainError> {
    Ok(parcels_adapter::set_status(conn, id, from, to).await?)
}

pub async fn assign<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    delivery_man_id: Uuid,
    approximate_delivery_date: String,
) -> Result<u64, DomainError> {
    Ok(parcels_adapter::assign(conn, id, delivery_man_id, approximate_delivery_date).await?)
}

/// Send a delivery man's in-flight parcels back to `pending`; returns how many moved.
pub async fn release_assignments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    delivery_man_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(parcels_adapter::release_assignments(conn, delivery_man_id).await?)
}

impl From<crate::entities::parcels::Model> for Parcel {
    fn from(model: crate::entities::parcels::Model) -> Self {
        Self {
            id: model.id,
            owner_email: model.owner_email,
            owner_name: model.owner_name,
            owner_phone: model.owner_phone,
            parcel_type: model.parcel_type,
            weight_kg: model.weight_kg,
            receiver_name: model.receiver_name,
            receiver_phone: model.receiver_phone,
            delivery_address: model.delivery_address,
            latitude: model.latitude,
            longitude: model.longitude,
            requested_delivery_date: model.requested_delivery_date,
            price: model.price,
            status: model.status,
            delivery_man_id: model.delivery_man_id,
            approximate_delivery_date: model.approximate_delivery_date,
            booked_at: model.booked_at,
            updated_at: model.updated_at,
        }
    }
}
