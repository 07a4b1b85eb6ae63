use crate::entities::parcels::ParcelStatus;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

pub const MAX_WEIGHT_KG: f64 = 100.0;

/// Delivery price for a parcel of `weight_kg`.
///
/// Up to 1 kg costs 50, up to 2 kg costs 100, anything heavier 150.
pub fn price_for_weight(weight_kg: f64) -> Result<f64, DomainError> {
    let weight = validate_weight(weight_kg)?;
    let price = if weight <= 1.0 {
        50.0
    } else if weight <= 2.0 {
        100.0
    } else {
        150.0
    };
    Ok(price)
}

pub fn validate_weight(weight_kg: f64) -> Result<f64, DomainError> {
    if weight_kg.is_finite() && weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG {
        Ok(weight_kg)
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidWeight,
            format!("Weight must be greater than 0 and at most {MAX_WEIGHT_KG} kg"),
        ))
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), DomainError> {
    let ok = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    if ok {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::Other("Coordinates".into()),
            "Latitude must be within [-90, 90] and longitude within [-180, 180]",
        ))
    }
}

/// Whether a parcel may move from `from` to `to`.
pub fn can_transition(from: ParcelStatus, to: ParcelStatus) -> bool {
    use ParcelStatus::{Cancelled, Delivered, OnTheWay, Pending, Returned};

    matches!(
        (from, to),
        (Pending, Cancelled) | (Pending, OnTheWay) | (OnTheWay, Delivered) | (OnTheWay, Returned)
    )
}

pub fn check_transition(from: ParcelStatus, to: ParcelStatus) -> Result<(), DomainError> {
    if can_transition(from, to) {
        Ok(())
    } else if is_terminal(from) {
        Err(DomainError::conflict(
            ConflictKind::StatusTransition,
            format!("Parcel is already {}", status_name(from)),
        ))
    } else {
        Err(DomainError::conflict(
            ConflictKind::StatusTransition,
            format!(
                "Cannot change parcel status from {} to {}",
                status_name(from),
                status_name(to)
            ),
        ))
    }
}

/// Terminal statuses accept no further transition.
pub fn is_terminal(status: ParcelStatus) -> bool {
    matches!(
        status,
        ParcelStatus::Delivered | ParcelStatus::Returned | ParcelStatus::Cancelled
    )
}

pub fn status_name(status: ParcelStatus) -> &'static str {
    match status {
        ParcelStatus::Pending => "pending",
        ParcelStatus::OnTheWay => "on_the_way",
        ParcelStatus::Delivered => "delivered",
        ParcelStatus::Returned => "returned",
        ParcelStatus::Cancelled => "cancelled",
    }
}

pub fn parse_status(raw: &str) -> Result<ParcelStatus, DomainError> {
    use sea_orm::Iterable;

    ParcelStatus::iter()
        .find(|s| status_name(*s) == raw)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidEnumValue,
                format!("Unknown parcel status '{raw}'"),
            )
        })
}
