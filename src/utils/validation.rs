//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied here before any write.

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: floor, location, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: invoice numbers, payment methods
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers (entity-level, errors are collected) ─────────

/// Check that a required string is non-empty after trimming.
/// Pushes `"{field} is required"` onto `errors` when it is not.
pub fn require_text(value: Option<&str>, field: &str, errors: &mut Vec<String>) {
    match value {
        Some(v) if !v.trim().is_empty() => {}
        _ => errors.push(format!("{field} is required")),
    }
}

/// Check that a string, if present, is within the length limit.
pub fn check_text_len(value: Option<&str>, field: &str, max_len: usize, errors: &mut Vec<String>) {
    if let Some(v) = value
        && v.len() > max_len
    {
        errors.push(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ));
    }
}
