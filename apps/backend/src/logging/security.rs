use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A bearer token failed verification (bad signature, algorithm, shape or expiry).
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Token verification failed"
    );
}

/// A verified caller was refused by the privilege check.
pub fn access_denied(email: &str, required: &str, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        email = %Redacted(email),
        required,
        reason,
        "Privilege check failed"
    );
}

/// Token issuance was refused for an email without a user record.
pub fn issuance_refused(email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ISSUANCE_REFUSED",
        %trace_id,
        email = %Redacted(email),
        "Token requested for unregistered email"
    );
}
