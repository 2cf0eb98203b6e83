//! Application error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// `details` carries field-level messages for form validation
/// (`{"checkoutDate": "Checkout date must be after checkin date"}`) or
/// debugging context such as the missing resource name.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Message attached to a form field, if any
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.details.as_ref()?.get(field)?.as_str()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Result type alias using [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid email format");
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Reservation form is incomplete")
            .with_detail("petId", "Select a pet or register a new one")
            .with_detail("hotelId", "Select a hotel");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(
            err.field_error("petId"),
            Some("Select a pet or register a new one")
        );
        assert_eq!(err.field_error("hotelId"), Some("Select a hotel"));
        assert_eq!(err.field_error("userId"), None);
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::not_found("Reservation abc");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Reservation abc not found");
        assert_eq!(err.field_error("resource"), Some("Reservation abc"));

        let err = AppError::invalid_credentials();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err = AppError::database("disk full");
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_app_error_serialize() {
        let err = AppError::new(ErrorCode::ReservationInvalidDates);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 5002);
        assert_eq!(json["message"], "Checkout date must be after checkin date");
        assert!(json.get("details").is_none());
    }
}
