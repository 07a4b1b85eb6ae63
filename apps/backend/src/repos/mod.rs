//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod parcels;
pub mod reviews;
pub mod users;
