pub mod claims;
pub mod gate;
pub mod issuance;
pub mod jwt;
pub mod roles;

pub use claims::CallerIdentity;
pub use gate::{authorize, AccessDecision, DenyReason, UserDirectory, UserRecord};
pub use issuance::issue_token;
pub use roles::Role;
