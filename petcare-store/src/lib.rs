//! PetCare store - pet boarding reservations
//!
//! # Overview
//!
//! Guardians board their pets at hotels. Each entity type is one JSON
//! collection in a key-value store; repositories do whole-collection
//! read-modify-write on top of it.
//!
//! - **Storage** (`storage`): the [`CollectionStore`] port, redb and in-memory backends
//! - **Repositories** (`repository`): users, pets, hotels, reservations, stay updates
//! - **Lifecycle** (`lifecycle`): reservation status transition policy
//! - **Auth** (`auth`): login, session marker, route gate
//! - **Services** (`services`): booking and dashboard views
//! - **Seed** (`seed`): demo dataset
//!
//! # Layout
//!
//! ```text
//! petcare-store/src/
//! ├── core/          # config, store state
//! ├── storage/       # CollectionStore, RedbStore, MemoryStore
//! ├── repository/    # typed repositories
//! ├── lifecycle.rs   # status transitions
//! ├── auth/          # password, session, gate
//! ├── services/      # booking, dashboard
//! ├── seed.rs        # demo data
//! └── utils/         # logger, validation
//! ```

pub mod auth;
pub mod core;
pub mod lifecycle;
pub mod repository;
pub mod seed;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, StoreState, setup_environment};
pub use auth::{AuthService, GateDecision, Session, route_gate};
pub use lifecycle::TransitionPolicy;
pub use repository::{RepoError, RepoResult};
pub use seed::Seeder;
pub use services::{BookingService, DashboardService};
pub use storage::{CollectionStore, MemoryStore, RedbStore, StorageError};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
