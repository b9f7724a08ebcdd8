//! Input validation helpers
//!
//! Centralized text length constants and a collector that gathers every
//! rejected field before failing, so callers can fix all of them at once.

use super::{AppError, AppResult, FieldViolation};

// ── Text length limits ──────────────────────────────────────────────

/// Goal titles, product names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, custom goal descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Units, ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Numeric limits ──────────────────────────────────────────────────

/// Upper bound for goal targets and reported progress
pub const MAX_GOAL_VALUE: f64 = 1_000_000_000_000.0;

// ── Collector ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.items.push(FieldViolation::new(field, message));
    }

    /// Non-empty and within the length limit
    pub fn required_text(&mut self, value: &str, field: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.push(field, format!("{field} must not be empty"));
        } else if value.chars().count() > max_len {
            self.push(
                field,
                format!(
                    "{field} is too long ({} chars, max {max_len})",
                    value.chars().count()
                ),
            );
        }
    }

    /// Within the length limit when present
    pub fn optional_text(&mut self, value: &Option<String>, field: &str, max_len: usize) {
        if let Some(v) = value
            && v.chars().count() > max_len
        {
            self.push(
                field,
                format!("{field} is too long ({} chars, max {max_len})", v.chars().count()),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Ok` when nothing was rejected, otherwise one error listing everything
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_fields(self.items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_violations() {
        let mut v = Violations::new();
        v.required_text("  ", "title", MAX_NAME_LEN);
        v.optional_text(&Some("x".repeat(MAX_NOTE_LEN + 1)), "description", MAX_NOTE_LEN);
        v.optional_text(&None, "unit", MAX_SHORT_TEXT_LEN);

        let err = v.into_result().unwrap_err();
        let fields: Vec<String> = err.violations().into_iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn test_empty_is_ok() {
        let mut v = Violations::new();
        v.required_text("Objectif CA", "title", MAX_NAME_LEN);
        assert!(v.is_empty());
        assert!(v.into_result().is_ok());
    }
}
