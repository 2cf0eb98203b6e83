//! Dashboard views
//!
//! Read-only projections for the hotel dashboard, the guardian's home page
//! and the reservation detail page. References that no longer resolve are
//! shown as [`MISSING_NAME`].

use std::collections::HashMap;

use serde::Serialize;
use shared::models::{Hotel, Reservation, ReservationStatus, StayUpdate};

use crate::core::StoreState;
use crate::lifecycle;

/// Placeholder for a dangling pet, user or hotel reference
pub const MISSING_NAME: &str = "—";

/// Reservation with display names resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub pet_name: String,
    pub user_name: String,
    pub hotel_name: String,
}

/// Detail page: the view, its journal and the status actions to offer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetail {
    pub view: ReservationView,
    pub updates: Vec<StayUpdate>,
    pub actions: Vec<ReservationStatus>,
}

/// Status + free-text filter; `None` / empty means no constraint
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub query: Option<String>,
}

impl ReservationFilter {
    fn matches(&self, view: &ReservationView) -> bool {
        if let Some(status) = self.status
            && view.reservation.status != status
        {
            return false;
        }

        let query = self
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default();
        if query.is_empty() {
            return true;
        }

        let haystack = [
            view.pet_name.as_str(),
            view.user_name.as_str(),
            view.reservation.notes.as_deref().unwrap_or(""),
            view.reservation.checkin_date.as_str(),
            view.reservation.checkout_date.as_str(),
        ]
        .join(" ")
        .to_lowercase();
        haystack.contains(&query)
    }
}

/// Counters shown above the hotel dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelTotals {
    pub total: usize,
    pub pending: usize,
    pub checked_in: usize,
}

impl HotelTotals {
    pub fn count(reservations: &[ReservationView]) -> Self {
        let by_status = |s: ReservationStatus| {
            reservations
                .iter()
                .filter(|v| v.reservation.status == s)
                .count()
        };
        Self {
            total: reservations.len(),
            pending: by_status(ReservationStatus::Pending),
            checked_in: by_status(ReservationStatus::CheckedIn),
        }
    }
}

/// Apply `filter` and sort by check-in date, earliest first
pub fn filter_views(
    views: Vec<ReservationView>,
    filter: &ReservationFilter,
) -> Vec<ReservationView> {
    let mut views: Vec<_> = views.into_iter().filter(|v| filter.matches(v)).collect();
    views.sort_by(|a, b| a.reservation.checkin_date.cmp(&b.reservation.checkin_date));
    views
}

#[derive(Clone)]
pub struct DashboardService {
    state: StoreState,
}

impl DashboardService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// The hotel a dashboard opens on: the first one stored
    pub fn primary_hotel(&self) -> Option<Hotel> {
        self.state.hotels.primary()
    }

    fn enrich(&self, reservations: Vec<Reservation>) -> Vec<ReservationView> {
        let pets: HashMap<String, String> = self
            .state
            .pets
            .list()
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let users: HashMap<String, String> = self
            .state
            .users
            .list()
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let hotels: HashMap<String, String> = self
            .state
            .hotels
            .list()
            .into_iter()
            .map(|h| (h.id, h.name))
            .collect();

        let name_of = |names: &HashMap<String, String>, id: &str| {
            names.get(id).cloned().unwrap_or_else(|| MISSING_NAME.to_string())
        };

        reservations
            .into_iter()
            .map(|reservation| ReservationView {
                pet_name: name_of(&pets, &reservation.pet_id),
                user_name: name_of(&users, &reservation.user_id),
                hotel_name: name_of(&hotels, &reservation.hotel_id),
                reservation,
            })
            .collect()
    }

    /// Reservations of a hotel, in stored order
    pub fn reservation_views_for_hotel(&self, hotel_id: &str) -> Vec<ReservationView> {
        self.enrich(self.state.reservations.list_by_hotel(hotel_id))
    }

    /// Reservations of a guardian, in stored order
    pub fn reservation_views_for_user(&self, user_id: &str) -> Vec<ReservationView> {
        self.enrich(self.state.reservations.list_by_user(user_id))
    }

    /// Hotel dashboard: filtered views plus totals over the unfiltered set
    pub fn hotel_dashboard(
        &self,
        hotel_id: &str,
        filter: &ReservationFilter,
    ) -> (Vec<ReservationView>, HotelTotals) {
        let views = self.reservation_views_for_hotel(hotel_id);
        let totals = HotelTotals::count(&views);
        (filter_views(views, filter), totals)
    }

    pub fn reservation_detail(&self, id: &str) -> Option<ReservationDetail> {
        let reservation = self.state.reservations.get(id)?;
        let actions =
            lifecycle::available_targets(self.state.reservations.policy(), reservation.status);
        let view = self.enrich(vec![reservation]).pop()?;
        Some(ReservationDetail {
            updates: self.state.stay_updates.list_by_reservation(id),
            actions,
            view,
        })
    }
}
