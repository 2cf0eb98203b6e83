//! Utilities: logging setup and input validation

pub mod logger;
pub mod validation;

pub use logger::{init_logger, init_logger_with_file};
