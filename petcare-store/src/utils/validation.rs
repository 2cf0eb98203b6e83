//! Input validation helpers
//!
//! Field checks shared by the auth and booking services. Each check returns
//! the message for one field; callers collect them into a single
//! [`AppError`] with one detail per failing field.

use shared::error::{AppError, ErrorCode};
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Names of users, pets and hotels
pub const MAX_NAME_LEN: usize = 200;

/// Free-text notes
pub const MAX_NOTE_LEN: usize = 500;

/// Species, phone
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Calendar date format used for check-in / check-out
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-field error messages collected before anything is written
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        // Keep only the first message per field
        if !self.has(field) {
            self.errors.push((field.to_string(), message.into()));
        }
    }

    /// Record the outcome of a single-field check
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| f == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when no field failed, otherwise a `ValidationFailed` error with
    /// one detail per field
    pub fn into_result(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let summary = self
            .errors
            .iter()
            .map(|(field, _)| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!("Invalid fields: {summary}");
        let mut err = AppError::with_message(ErrorCode::ValidationFailed, message);
        for (field, message) in self.errors {
            err = err.with_detail(field, message);
        }
        Err(err)
    }
}

/// Non-empty after trimming and within `max_len`
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

/// Within `max_len` when present
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(format!("{field} is too long ({} chars, max {max_len})", v.len()));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), String> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    if !value.trim().to_string().validate_email() {
        return Err(format!("'{}' is not a valid email address", value.trim()));
    }
    Ok(())
}

pub fn validate_password(value: &str, min_len: usize) -> Result<(), String> {
    if value.len() < min_len {
        return Err(format!("password must be at least {min_len} characters"));
    }
    if value.len() > MAX_PASSWORD_LEN {
        return Err(format!("password is too long (max {MAX_PASSWORD_LEN})"));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str, field: &str) -> Result<chrono::NaiveDate, String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    chrono::NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("{field} must be a date in YYYY-MM-DD format"))
}
