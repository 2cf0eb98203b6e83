//! Unified error system for PetCare
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type with code, message and field-level details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: User errors
//! - 5xxx: Reservation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ReservationInvalidDates);
//! assert_eq!(err.code.code(), 5002);
//!
//! // Form-level errors keyed by field
//! let err = AppError::validation("Reservation form is incomplete")
//!     .with_detail("hotelId", "Select a hotel");
//! assert!(err.field_error("hotelId").is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
