//! Draft validation.

use std::sync::LazyLock;

use regex::Regex;

use super::model::DraftInput;
use crate::error::ValidationError;

/// Permissive `local@domain.tld` shape: no whitespace, one `@`, a dot in the
/// domain part with something after it.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"));

/// Check an address against the permissive email pattern.
///
/// The raw value is tested, so leading or trailing whitespace fails.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// True iff the trimmed string is non-empty.
pub fn is_non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Check a draft before an analyze request.
///
/// Fields are checked in a fixed order (sender, recipient, subject, body)
/// and only the first violation is returned.
pub fn validate_draft(draft: &DraftInput) -> Result<(), ValidationError> {
    if !is_valid_email(&draft.sender_email) {
        return Err(ValidationError::InvalidSender);
    }
    if !is_valid_email(&draft.recipient_email) {
        return Err(ValidationError::InvalidRecipient);
    }
    if !is_non_empty(&draft.subject) {
        return Err(ValidationError::MissingSubject);
    }
    if !is_non_empty(&draft.body) {
        return Err(ValidationError::MissingBody);
    }
    Ok(())
}
