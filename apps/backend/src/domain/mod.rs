//! Domain layer: pure parcel and review rules.

pub mod parcels;
pub mod reviews;
