//! SeaORM -> DomainError translation.
//!
//! Repos convert `sea_orm::DbErr` here; higher layers then map
//! `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn is_unique_violation(msg: &str) -> bool {
    msg.contains("23505")
        || msg.contains("duplicate key value")
        || msg.contains("UNIQUE constraint failed")
}

fn is_email_constraint(msg: &str) -> bool {
    msg.contains("users_email_key") || msg.contains("users.email")
}

/// Translate a `DbErr` into a `DomainError` with PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, error = %Redacted(&msg), "database connection failure");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&msg) {
        if is_email_constraint(&msg) {
            return DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered");
        }
        return DomainError::conflict(
            ConflictKind::Other("UniqueViolation".into()),
            "Unique constraint violation",
        );
    }

    error!(trace_id = %trace_id, error = %Redacted(&msg), "unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database error")
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
