use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are vetted literals; construction cannot fail.
#[allow(clippy::unwrap_used)]
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

// Base64/base64url runs of 16+ chars: JWT segments, API keys, secrets.
#[allow(clippy::unwrap_used)]
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap());

/// Mask emails and opaque tokens in free text before it reaches a log line.
///
/// Emails keep the first character of the local part and the full domain
/// (`u***@example.com`). Token-like runs become `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let emails_masked = EMAIL_REGEX.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.find('@') {
            Some(0) | None => full.to_string(),
            Some(at) => {
                let first = &full[..1];
                format!("{first}***{}", &full[at..])
            }
        }
    });

    TOKEN_REGEX
        .replace_all(&emails_masked, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
