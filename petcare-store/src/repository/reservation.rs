//! Reservation Repository
//!
//! Every status change, whether through [`ReservationRepository::change_status`]
//! or a status carried in a [`ReservationUpdate`], passes through
//! [`lifecycle::check_transition`] with the repository's policy.

use super::{BaseRepository, Patch, Record, RepoResult, Stamped};
use crate::lifecycle::{self, TransitionPolicy};
use crate::storage::{Collection, CollectionStore};
use shared::models::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate};
use shared::util::{new_id, now_iso};
use std::sync::Arc;

impl Record for Reservation {
    const COLLECTION: Collection = Collection::Reservations;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Stamped for Reservation {
    fn touch(&mut self, at: String) {
        self.updated_at = Some(at);
    }
}

/// Merges everything except `status`, which needs the transition check
impl Patch<Reservation> for ReservationUpdate {
    fn apply_to(self, r: &mut Reservation) {
        if let Some(pet_id) = self.pet_id {
            r.pet_id = pet_id;
        }
        if let Some(user_id) = self.user_id {
            r.user_id = user_id;
        }
        if let Some(hotel_id) = self.hotel_id {
            r.hotel_id = hotel_id;
        }
        if let Some(checkin) = self.checkin_date {
            r.checkin_date = checkin;
        }
        if let Some(checkout) = self.checkout_date {
            r.checkout_date = checkout;
        }
        if self.notes.is_some() {
            r.notes = self.notes;
        }
        if self.status_note.is_some() {
            r.status_note = self.status_note;
        }
    }
}

fn apply_status(
    policy: TransitionPolicy,
    reservation: &mut Reservation,
    status: ReservationStatus,
) -> RepoResult<()> {
    lifecycle::check_transition(policy, reservation.status, status)?;
    reservation.status = status;
    Ok(())
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository<Reservation>,
    policy: TransitionPolicy,
}

impl ReservationRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self::with_policy(store, TransitionPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn CollectionStore>, policy: TransitionPolicy) -> Self {
        Self {
            base: BaseRepository::new(store),
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn list(&self) -> Vec<Reservation> {
        self.base.list()
    }

    pub fn list_by_hotel(&self, hotel_id: &str) -> Vec<Reservation> {
        self.base.list_where(|r| r.hotel_id == hotel_id)
    }

    pub fn list_by_user(&self, user_id: &str) -> Vec<Reservation> {
        self.base.list_where(|r| r.user_id == user_id)
    }

    pub fn list_by_pet(&self, pet_id: &str) -> Vec<Reservation> {
        self.base.list_where(|r| r.pet_id == pet_id)
    }

    pub fn get(&self, id: &str) -> Option<Reservation> {
        self.base.get(id)
    }

    /// Create a reservation in `PENDING`.
    ///
    /// References and dates are stored as given.
    pub fn create(&self, data: ReservationCreate) -> RepoResult<Reservation> {
        let reservation = Reservation {
            id: new_id(),
            pet_id: data.pet_id,
            user_id: data.user_id,
            hotel_id: data.hotel_id,
            checkin_date: data.checkin_date,
            checkout_date: data.checkout_date,
            status: ReservationStatus::Pending,
            notes: data.notes,
            status_note: None,
            created_at: now_iso(),
            updated_at: None,
        };

        let reservation = self.base.insert(reservation)?;
        tracing::info!(
            reservation_id = %reservation.id,
            hotel_id = %reservation.hotel_id,
            checkin = %reservation.checkin_date,
            checkout = %reservation.checkout_date,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Merge `data` over the reservation. A status in the patch is checked
    /// like [`Self::change_status`]; on refusal nothing is written.
    pub fn update(&self, id: &str, mut data: ReservationUpdate) -> RepoResult<Option<Reservation>> {
        let status = data.status.take();
        let policy = self.policy;
        self.base.modify(id, |reservation| {
            if let Some(status) = status {
                apply_status(policy, reservation, status)?;
            }
            data.apply_to(reservation);
            Ok(())
        })
    }

    /// Move the reservation to `status`.
    ///
    /// A non-empty `note` replaces `statusNote`, whatever the target status;
    /// otherwise the previous note is kept.
    pub fn change_status(
        &self,
        id: &str,
        status: ReservationStatus,
        note: Option<&str>,
    ) -> RepoResult<Option<Reservation>> {
        let policy = self.policy;
        let mut from = None;
        let updated = self.base.modify(id, |reservation| {
            from = Some(reservation.status);
            apply_status(policy, reservation, status)?;
            if let Some(note) = note.filter(|n| !n.is_empty()) {
                reservation.status_note = Some(note.to_string());
            }
            Ok(())
        })?;

        if let (Some(from), Some(_)) = (from, &updated) {
            tracing::info!(reservation_id = %id, %from, to = %status, "Reservation status changed");
        }
        Ok(updated)
    }

    /// Delete a reservation. Its stay updates are kept.
    pub fn remove(&self, id: &str) -> RepoResult<bool> {
        let removed = self.base.remove(id)?;
        if removed {
            tracing::info!(reservation_id = %id, "Reservation removed");
        }
        Ok(removed)
    }

    pub(crate) fn clear(&self) -> RepoResult<bool> {
        self.base.clear()
    }
}
