//! Helpers for generating unique test data.

use uuid::Uuid;

/// Unique string in the form `{prefix}-{uuid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("parcel");
/// let b = unique_str("parcel");
/// assert_ne!(a, b);
/// assert!(a.starts_with("parcel-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Unique email address in the form `{prefix}-{uuid}@example.test`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("courier");
/// assert!(email.starts_with("courier-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_str(prefix))
}
