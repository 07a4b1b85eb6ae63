use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

/// Canonical form used for storage and lookups: NFKC, trimmed, lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.nfkc().collect::<String>().trim().to_lowercase()
}

/// Normalise `raw` and reject values that cannot be an address.
///
/// The check is structural only: one `@`, non-empty local part, a dotted
/// domain and no whitespace.
pub fn parse_email(raw: &str) -> Result<String, DomainError> {
    let email = normalize_email(raw);
    let invalid = || DomainError::validation(ValidationKind::InvalidEmail, "Invalid email address");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);

    if well_formed {
        Ok(email)
    } else {
        Err(invalid())
    }
}
