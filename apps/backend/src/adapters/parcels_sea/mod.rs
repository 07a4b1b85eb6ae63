//! SeaORM adapter for the parcels table.
//!
//! Every mutation is conditional on the parcel's current status so a
//! concurrent change surfaces as zero affected rows instead of a lost update.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::parcels::{self, ParcelStatus};

pub mod dto;

pub use dto::{ParcelCreate, ParcelDetailsUpdate};

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParcelCreate,
) -> Result<parcels::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let parcel_active = parcels::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_email: Set(dto.owner_email),
        owner_name: Set(dto.owner_name),
        owner_phone: Set(dto.owner_phone),
        parcel_type: Set(dto.parcel_type),
        weight_kg: Set(dto.weight_kg),
        receiver_name: Set(dto.receiver_name),
        receiver_phone: Set(dto.receiver_phone),
        delivery_address: Set(dto.delivery_address),
        latitude: Set(dto.latitude),
        longitude: Set(dto.longitude),
        requested_delivery_date: Set(dto.requested_delivery_date),
        price: Set(dto.price),
        status: Set(ParcelStatus::Pending),
        delivery_man_id: Set(None),
        approximate_delivery_date: Set(None),
        booked_at: Set(now),
        updated_at: Set(now),
    };

    parcel_active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<parcels::Model>, sea_orm::DbErr> {
    parcels::Entity::find_by_id(id).one(conn).await
}

pub async fn list_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_email: &str,
    status: Option<ParcelStatus>,
) -> Result<Vec<parcels::Model>, sea_orm::DbErr> {
    let mut query = parcels::Entity::find().filter(parcels::Column::OwnerEmail.eq(owner_email));
    if let Some(status) = status {
        query = query.filter(parcels::Column::Status.eq(status));
    }
    query
        .order_by_desc(parcels::Column::BookedAt)
        .all(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: Option<ParcelStatus>,
) -> Result<Vec<parcels::Model>, sea_orm::DbErr> {
    let mut query = parcels::Entity::find();
    if let Some(status) = status {
        query = query.filter(parcels::Column::Status.eq(status));
    }
    query
        .order_by_desc(parcels::Column::BookedAt)
        .all(conn)
        .await
}

pub async fn list_assigned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    delivery_man_id: Uuid,
) -> Result<Vec<parcels::Model>, sea_orm::DbErr> {
    parcels::Entity::find()
        .filter(parcels::Column::DeliveryManId.eq(delivery_man_id))
        .order_by_desc(parcels::Column::BookedAt)
        .all(conn)
        .await
}

/// Rewrite booking details while the parcel is still `pending`.
pub async fn update_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    dto: ParcelDetailsUpdate,
) -> Result<u64, sea_orm::DbErr> {
    let res = parcels::Entity::update_many()
        .set(parcels::ActiveModel {
            owner_phone: Set(dto.owner_phone),
            parcel_type: Set(dto.parcel_type),
            weight_kg: Set(dto.weight_kg),
            receiver_name: Set(dto.receiver_name),
            receiver_phone: Set(dto.receiver_phone),
            delivery_address: Set(dto.delivery_address),
            latitude: Set(dto.latitude),
            longitude: Set(dto.longitude),
            requested_delivery_date: Set(dto.requested_delivery_date),
            price: Set(dto.price),
            updated_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        })
        .filter(parcels::Column::Id.eq(id))
        .filter(parcels::Column::Status.eq(ParcelStatus::Pending))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Move `id` from `from` to `to`; returns 0 when the parcel is not in `from`.
pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    from: ParcelStatus,
    to: ParcelStatus,
) -> Result<u64, sea_orm::DbErr> {
    let res = parcels::Entity::update_many()
        .set(parcels::ActiveModel {
            status: Set(to),
            updated_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        })
        .filter(parcels::Column::Id.eq(id))
        .filter(parcels::Column::Status.eq(from))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Assign a pending parcel and mark it `on_the_way`.
pub async fn assign<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    delivery_man_id: Uuid,
    approximate_delivery_date: String,
) -> Result<u64, sea_orm::DbErr> {
    let res = parcels::Entity::update_many()
        .set(parcels::ActiveModel {
            status: Set(ParcelStatus::OnTheWay),
            delivery_man_id: Set(Some(delivery_man_id)),
            approximate_delivery_date: Set(Some(approximate_delivery_date)),
            updated_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        })
        .filter(parcels::Column::Id.eq(id))
        .filter(parcels::Column::Status.eq(ParcelStatus::Pending))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Return every `on_the_way` parcel held by `delivery_man_id` to `pending`,
/// clearing the assignment.
pub async fn release_assignments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    delivery_man_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = parcels::Entity::update_many()
        .set(parcels::ActiveModel {
            status: Set(ParcelStatus::Pending),
            delivery_man_id: Set(None),
            approximate_delivery_date: Set(None),
            updated_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        })
        .filter(parcels::Column::DeliveryManId.eq(delivery_man_id))
        .filter(parcels::Column::Status.eq(ParcelStatus::OnTheWay))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
