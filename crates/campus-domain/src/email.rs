//! Email identity helpers.
//!
//! Every lookup and every storage write goes through [`normalize`] so the
//! same mailbox always maps to the same identity string.

/// Canonical identity form: trimmed and ASCII-lowercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Case-insensitive suffix test, used to force the student role for
/// institutional addresses at registration.
pub fn has_suffix(email: &str, suffix: &str) -> bool {
    normalize(email).ends_with(&suffix.trim().to_ascii_lowercase())
}
