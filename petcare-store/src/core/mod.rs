//! Core: configuration and the shared store state

pub mod config;
pub mod state;

pub use config::{Config, setup_environment};
pub use state::StoreState;
