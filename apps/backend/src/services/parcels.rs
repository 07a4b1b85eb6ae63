//! Parcel lifecycle: booking, editing and status changes.
//!
//! Each operation reads the parcel, applies the pure rules in
//! `domain::parcels`, then issues one status-conditional write. A write that
//! matches zero rows means the parcel changed underneath us and is reported
//! as a conflict.

use sea_orm::ConnectionTrait;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::gate::UserRecord;
use crate::auth::roles::Role;
use crate::domain::parcels::{check_transition, price_for_weight, validate_coordinates};
use crate::entities::parcels::ParcelStatus;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::repos::parcels::{self, Parcel, ParcelCreate, ParcelDetailsUpdate};
use crate::repos::users::{self, User};

/// Booking details supplied by the parcel owner.
#[derive(Debug, Clone, Deserialize)]
pub struct ParcelInput {
    pub owner_phone: String,
    pub parcel_type: String,
    pub weight_kg: f64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub delivery_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub requested_delivery_date: String,
}

struct CheckedInput {
    input: ParcelInput,
    price: f64,
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other(field.to_string()),
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

fn check_input(input: ParcelInput) -> Result<CheckedInput, DomainError> {
    require_text("owner_phone", &input.owner_phone)?;
    require_text("parcel_type", &input.parcel_type)?;
    require_text("receiver_name", &input.receiver_name)?;
    require_text("receiver_phone", &input.receiver_phone)?;
    require_text("delivery_address", &input.delivery_address)?;
    require_text("requested_delivery_date", &input.requested_delivery_date)?;
    validate_coordinates(input.latitude, input.longitude)?;
    let price = price_for_weight(input.weight_kg)?;
    Ok(CheckedInput { input, price })
}

fn parcel_not_found(id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Parcel, format!("Parcel {id} not found"))
}

fn changed_concurrently(id: Uuid) -> DomainError {
    DomainError::conflict(
        ConflictKind::StatusTransition,
        format!("Parcel {id} changed status concurrently"),
    )
}

async fn load<C: ConnectionTrait + Send + Sync>(conn: &C, id: Uuid) -> Result<Parcel, AppError> {
    Ok(parcels::find_by_id(conn, id)
        .await?
        .ok_or_else(|| parcel_not_found(id))?)
}

fn ensure_owner(parcel: &Parcel, caller_email: &str) -> Result<(), AppError> {
    if parcel.owner_email != caller_email {
        return Err(AppError::forbidden_with_code(
            ErrorCode::NotOwner,
            "Parcel belongs to another user",
        ));
    }
    Ok(())
}

/// Book a parcel for `owner`; price is computed here, never taken from input.
pub async fn book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: &User,
    input: ParcelInput,
) -> Result<Parcel, AppError> {
    let CheckedInput { input, price } = check_input(input)?;

    let parcel = parcels::create(
        conn,
        ParcelCreate {
            owner_email: owner.email.clone(),
            owner_name: owner.name.clone(),
            owner_phone: input.owner_phone,
            parcel_type: input.parcel_type,
            weight_kg: input.weight_kg,
            receiver_name: input.receiver_name,
            receiver_phone: input.receiver_phone,
            delivery_address: input.delivery_address,
            latitude: input.latitude,
            longitude: input.longitude,
            requested_delivery_date: input.requested_delivery_date,
            price,
        },
    )
    .await?;

    info!(parcel_id = %parcel.id, price, "parcel booked");
    Ok(parcel)
}

/// Replace the booking details of a pending parcel owned by `caller_email`.
pub async fn edit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_email: &str,
    id: Uuid,
    input: ParcelInput,
) -> Result<Parcel, AppError> {
    let parcel = load(conn, id).await?;
    ensure_owner(&parcel, caller_email)?;
    if parcel.status != ParcelStatus::Pending {
        return Err(DomainError::conflict(
            ConflictKind::StatusTransition,
            "Only pending parcels can be edited",
        )
        .into());
    }

    let CheckedInput { input, price } = check_input(input)?;
    let rows = parcels::update_details(
        conn,
        id,
        ParcelDetailsUpdate {
            owner_phone: input.owner_phone,
            parcel_type: input.parcel_type,
            weight_kg: input.weight_kg,
            receiver_name: input.receiver_name,
            receiver_phone: input.receiver_phone,
            delivery_address: input.delivery_address,
            latitude: input.latitude,
            longitude: input.longitude,
            requested_delivery_date: input.requested_delivery_date,
            price,
        },
    )
    .await?;
    if rows == 0 {
        return Err(changed_concurrently(id).into());
    }

    load(conn, id).await
}

/// Owner cancels a pending parcel.
pub async fn cancel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_email: &str,
    id: Uuid,
) -> Result<Parcel, AppError> {
    let parcel = load(conn, id).await?;
    ensure_owner(&parcel, caller_email)?;
    transition(conn, &parcel, ParcelStatus::Cancelled).await
}

/// Admin assigns a pending parcel to a delivery man.
pub async fn assign<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    delivery_man_id: Uuid,
    approximate_delivery_date: String,
) -> Result<Parcel, AppError> {
    require_text("approximate_delivery_date", &approximate_delivery_date)?;

    let parcel = load(conn, id).await?;
    let delivery_man = users::find_by_id(conn, delivery_man_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::User,
                format!("User {delivery_man_id} not found"),
            )
        })?;
    if delivery_man.role != Role::DeliveryMan {
        return Err(DomainError::conflict(
            ConflictKind::NotADeliveryMan,
            "Parcels can only be assigned to delivery men",
        )
        .into());
    }

    check_transition(parcel.status, ParcelStatus::OnTheWay)?;
    let rows = parcels::assign(conn, id, delivery_man_id, approximate_delivery_date).await?;
    if rows == 0 {
        return Err(changed_concurrently(id).into());
    }

    info!(parcel_id = %id, delivery_man_id = %delivery_man_id, "parcel assigned");
    load(conn, id).await
}

/// The assigned delivery man records the outcome of a delivery.
pub async fn record_delivery_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &UserRecord,
    id: Uuid,
    outcome: ParcelStatus,
) -> Result<Parcel, AppError> {
    if !matches!(outcome, ParcelStatus::Delivered | ParcelStatus::Returned) {
        return Err(AppError::bad_request(
            ErrorCode::InvalidEnumValue,
            "Status must be delivered or returned",
        ));
    }

    let parcel = load(conn, id).await?;
    if parcel.delivery_man_id != Some(caller.id) {
        return Err(AppError::forbidden_with_code(
            ErrorCode::NotOwner,
            "Parcel is not assigned to you",
        ));
    }
    transition(conn, &parcel, outcome).await
}

async fn transition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    parcel: &Parcel,
    to: ParcelStatus,
) -> Result<Parcel, AppError> {
    check_transition(parcel.status, to)?;
    let rows = parcels::set_status(conn, parcel.id, parcel.status, to).await?;
    if rows == 0 {
        return Err(changed_concurrently(parcel.id).into());
    }
    info!(parcel_id = %parcel.id, from = ?parcel.status, to = ?to, "parcel status changed");
    load(conn, parcel.id).await
}
