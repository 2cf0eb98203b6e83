//! Services built on the repositories
//!
//! - [`BookingService`] - validated reservation creation
//! - [`DashboardService`] - read-only reservation views

pub mod booking;
pub mod dashboard;

pub use booking::{BookingRequest, BookingService, GuardianChoice, PetChoice};
pub use dashboard::{
    DashboardService, HotelTotals, MISSING_NAME, ReservationDetail, ReservationFilter,
    ReservationView, filter_views,
};
