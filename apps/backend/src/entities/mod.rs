pub mod parcels;
pub mod reviews;
pub mod users;

pub use parcels::{Entity as Parcels, ParcelStatus};
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
