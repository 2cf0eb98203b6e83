//! Data models
//!
//! Persisted records and their create/update payloads. Records serialize with
//! camelCase keys, which is the layout stored under each collection key.
//! All IDs are opaque strings, all timestamps ISO-8601 strings.

pub mod hotel;
pub mod pet;
pub mod reservation;
pub mod stay_update;
pub mod user;

// Re-exports
pub use hotel::*;
pub use pet::*;
pub use reservation::*;
pub use stay_update::*;
pub use user::*;
