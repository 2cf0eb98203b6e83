//! Demo data
//!
//! Resets the five entity collections to a small known dataset. Other keys in
//! the store (the session marker, anything foreign) are left alone.

use shared::models::{
    Hotel, HotelCreate, Pet, PetCreate, Reservation, ReservationCreate, Role, User, UserCreate,
};

use crate::core::StoreState;
use crate::repository::RepoResult;

/// Login email of the demo user
pub const DEMO_EMAIL: &str = "ana@example.com";
/// Password of the demo user
pub const DEMO_PASSWORD: &str = "petcare";

/// Records created by [`Seeder::seed_demo_data`]
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub user: User,
    pub pet: Pet,
    pub hotel: Hotel,
    pub reservation: Reservation,
}

#[derive(Clone)]
pub struct Seeder {
    state: StoreState,
}

impl Seeder {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Whether any entity collection holds a record
    pub fn is_seeded(&self) -> bool {
        !self.state.users.list().is_empty()
            || !self.state.pets.list().is_empty()
            || !self.state.hotels.list().is_empty()
            || !self.state.reservations.list().is_empty()
            || !self.state.stay_updates.list().is_empty()
    }

    fn clear_collections(&self) -> RepoResult<()> {
        self.state.users.clear()?;
        self.state.pets.clear()?;
        self.state.hotels.clear()?;
        self.state.reservations.clear()?;
        self.state.stay_updates.clear()?;
        Ok(())
    }

    /// Replace all entity data with the demo dataset
    pub fn seed_demo_data(&self) -> RepoResult<SeedSummary> {
        self.clear_collections()?;

        let user = self.state.users.create(UserCreate {
            name: "Ana Martins".to_string(),
            email: DEMO_EMAIL.to_string(),
            phone: Some("31999990000".to_string()),
            role: Role::Hotel,
            password: DEMO_PASSWORD.to_string(),
        })?;

        let pet = self.state.pets.create(PetCreate {
            user_id: user.id.clone(),
            name: "Max".to_string(),
            species: "Dog".to_string(),
            age: Some(3),
            obs: Some("Very gentle".to_string()),
            url: None,
        })?;

        let hotel = self.state.hotels.create(HotelCreate {
            name: "Hotel PetCare BH".to_string(),
            address: Some("Av. Central, 100 - Belo Horizonte".to_string()),
            capacity: Some(5),
            ..Default::default()
        })?;

        let reservation = self.state.reservations.create(ReservationCreate {
            pet_id: pet.id.clone(),
            user_id: user.id.clone(),
            hotel_id: hotel.id.clone(),
            checkin_date: "2025-11-10".to_string(),
            checkout_date: "2025-11-12".to_string(),
            notes: Some("Demo reservation".to_string()),
        })?;

        tracing::info!(
            user_id = %user.id,
            hotel_id = %hotel.id,
            reservation_id = %reservation.id,
            "Demo data seeded"
        );

        Ok(SeedSummary {
            user,
            pet,
            hotel,
            reservation,
        })
    }

    /// Seed only when every entity collection is empty.
    ///
    /// Returns whether data was written.
    pub fn seed_if_empty(&self) -> RepoResult<bool> {
        if self.is_seeded() {
            tracing::debug!("Store already holds data, skipping demo seed");
            return Ok(false);
        }
        self.seed_demo_data()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Collection;
    use shared::models::ReservationStatus;

    #[test]
    fn test_seed_creates_linked_records() {
        let state = StoreState::in_memory();
        let summary = state.seeder().seed_demo_data().unwrap();

        assert_eq!(state.users.list().len(), 1);
        assert_eq!(state.pets.list().len(), 1);
        assert_eq!(state.hotels.list().len(), 1);
        assert_eq!(state.reservations.list().len(), 1);

        assert_eq!(summary.user.role, Role::Hotel);
        assert_eq!(summary.pet.user_id, summary.user.id);
        assert_eq!(summary.hotel.capacity, Some(5));
        let r = &summary.reservation;
        assert_eq!(r.pet_id, summary.pet.id);
        assert_eq!(r.user_id, summary.user.id);
        assert_eq!(r.hotel_id, summary.hotel.id);
        assert_eq!(r.checkin_date, "2025-11-10");
        assert_eq!(r.checkout_date, "2025-11-12");
        assert_eq!(r.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_reseed_replaces_data() {
        let state = StoreState::in_memory();
        let seeder = state.seeder();
        seeder.seed_demo_data().unwrap();
        state
            .hotels
            .create(HotelCreate {
                name: "Extra".to_string(),
                ..Default::default()
            })
            .unwrap();

        seeder.seed_demo_data().unwrap();
        assert_eq!(state.hotels.list().len(), 1);
        assert_eq!(state.users.list().len(), 1);
    }

    #[test]
    fn test_seed_leaves_unrelated_keys() {
        let state = StoreState::in_memory();
        state.store.set("other:app", b"[1,2,3]").unwrap();

        state.seeder().seed_demo_data().unwrap();

        assert_eq!(state.store.get("other:app").unwrap(), Some(b"[1,2,3]".to_vec()));
        let keys = state.store.keys().unwrap();
        assert!(keys.contains(&Collection::Reservations.key().to_string()));
    }

    #[test]
    fn test_seed_if_empty() {
        let state = StoreState::in_memory();
        let seeder = state.seeder();
        assert!(!seeder.is_seeded());
        assert!(seeder.seed_if_empty().unwrap());
        assert!(seeder.is_seeded());
        assert!(!seeder.seed_if_empty().unwrap());
        assert_eq!(state.reservations.list().len(), 1);
    }

    #[test]
    fn test_demo_user_can_log_in() {
        let state = StoreState::in_memory();
        state.seeder().seed_demo_data().unwrap();
        let session = state.auth().login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert_eq!(session.role, Role::Hotel);
    }
}
