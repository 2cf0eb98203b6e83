//! Shared types for PetCare
//!
//! Entity models, create/update payloads, the unified error type and the
//! id/timestamp helpers used by `petcare-store` and by any UI layer built on it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
