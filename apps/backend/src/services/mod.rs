//! Operations that combine several repository calls with domain rules.

pub mod parcels;
pub mod reviews;
pub mod users;
