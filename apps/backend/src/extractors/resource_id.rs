use uuid::Uuid;

use crate::error::AppError;

/// Identifier of a stored user, parcel or review taken from the URL.
///
/// Parsed inside handlers, after the caller has been authenticated and
/// authorised, and before any store call keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub Uuid);

impl ResourceId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim())
            .map(ResourceId)
            .map_err(|_| AppError::invalid_identifier("Invalid resource identifier"))
    }

    pub fn into_inner(self) -> Uuid {
        self.0
    }
}
