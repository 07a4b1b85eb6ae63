pub mod authorized;
pub mod caller;
pub mod registered;
pub mod resource_id;
pub mod validated_json;

pub use authorized::{Admin, Authorized, DeliveryMan, RequiredRole};
pub use registered::RegisteredUser;
pub use resource_id::ResourceId;
pub use validated_json::{JsonBody, ValidatedJson};
