//! Error codes for the ParcelPro backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the `code` field of
//! an error response body.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No credentials supplied
    Unauthenticated,
    /// Token malformed, badly signed or expired
    InvalidToken,
    /// Caller's email has no user record
    ForbiddenUserNotFound,
    /// Caller's role does not grant the required privilege
    InsufficientRole,
    /// Caller does not own the targeted resource
    NotOwner,

    // Request Validation
    /// Resource identifier is not a valid store key
    InvalidIdentifier,
    /// Email missing or malformed
    InvalidEmail,
    /// Parcel weight outside the accepted range
    InvalidWeight,
    /// Review rating outside 1..=5
    InvalidRating,
    /// Unknown role or parcel status value
    InvalidEnumValue,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    UserNotFound,
    ParcelNotFound,
    ReviewNotFound,
    NotFound,

    // Business Logic Conflicts
    /// Email already registered
    UniqueEmail,
    /// Parcel is not in a status that allows the operation
    InvalidStatusTransition,
    /// Target user is not a delivery man
    NotADeliveryMan,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::NotOwner => "NOT_OWNER",

            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidEnumValue => "INVALID_ENUM_VALUE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ParcelNotFound => "PARCEL_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::NotADeliveryMan => "NOT_A_DELIVERY_MAN",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthenticated,
        Self::InvalidToken,
        Self::ForbiddenUserNotFound,
        Self::InsufficientRole,
        Self::NotOwner,
        Self::InvalidIdentifier,
        Self::InvalidEmail,
        Self::InvalidWeight,
        Self::InvalidRating,
        Self::InvalidEnumValue,
        Self::ValidationError,
        Self::BadRequest,
        Self::UserNotFound,
        Self::ParcelNotFound,
        Self::ReviewNotFound,
        Self::NotFound,
        Self::UniqueEmail,
        Self::InvalidStatusTransition,
        Self::NotADeliveryMan,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
