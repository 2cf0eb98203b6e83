use std::sync::Arc;

use crate::auth::AuthService;
use crate::core::Config;
use crate::lifecycle::TransitionPolicy;
use crate::repository::{
    HotelRepository, PetRepository, ReservationRepository, StayUpdateRepository, UserRepository,
};
use crate::seed::Seeder;
use crate::services::{BookingService, DashboardService};
use crate::storage::{CollectionStore, MemoryStore, RedbStore, StorageResult};

/// Store state - one handle holding every repository over a shared backend
///
/// Cloning is cheap: repositories only hold an `Arc` to the store.
///
/// # Components
///
/// | Field | Type | Collection |
/// |-------|------|------------|
/// | store | `Arc<dyn CollectionStore>` | backend |
/// | users | UserRepository | `petcare:users` |
/// | pets | PetRepository | `petcare:pets` |
/// | hotels | HotelRepository | `petcare:hotels` |
/// | reservations | ReservationRepository | `petcare:reservations` |
/// | stay_updates | StayUpdateRepository | `petcare:updates` |
///
/// # Example
///
/// ```ignore
/// let state = StoreState::open(&Config::from_env())?;
/// let hotel = state.dashboard().primary_hotel();
/// ```
#[derive(Clone)]
pub struct StoreState {
    pub store: Arc<dyn CollectionStore>,
    pub users: UserRepository,
    pub pets: PetRepository,
    pub hotels: HotelRepository,
    pub reservations: ReservationRepository,
    pub stay_updates: StayUpdateRepository,
}

impl StoreState {
    /// Build every repository over `store`
    pub fn with_store(store: Arc<dyn CollectionStore>, policy: TransitionPolicy) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            pets: PetRepository::new(store.clone()),
            hotels: HotelRepository::new(store.clone()),
            reservations: ReservationRepository::with_policy(store.clone(), policy),
            stay_updates: StayUpdateRepository::new(store.clone()),
            store,
        }
    }

    /// Open the redb file named by `config`
    pub fn open(config: &Config) -> StorageResult<Self> {
        let path = config.db_path();
        let store = RedbStore::open(&path)?;
        tracing::info!(
            path = %path.display(),
            policy = ?config.transition_policy(),
            "Store opened"
        );
        Ok(Self::with_store(Arc::new(store), config.transition_policy()))
    }

    /// Ephemeral state with the permissive policy
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), TransitionPolicy::default())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone(), self.users.clone())
    }

    pub fn booking(&self) -> BookingService {
        BookingService::new(self.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.clone())
    }

    pub fn seeder(&self) -> Seeder {
        Seeder::new(self.clone())
    }
}
