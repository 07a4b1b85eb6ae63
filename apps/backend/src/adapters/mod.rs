//! SeaORM adapters: one module per table, returning `DbErr`.

pub mod parcels_sea;
pub mod reviews_sea;
pub mod users_sea;
