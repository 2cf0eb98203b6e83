//! Reservation Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reservation lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    CheckedIn,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ReservationStatus; 6] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::Rejected,
        ReservationStatus::CheckedIn,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    /// Wire name (`CHECKED_IN`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Approved => "APPROVED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    /// Display label for badges and filters
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Approved => "Approved",
            ReservationStatus::Rejected => "Rejected",
            ReservationStatus::CheckedIn => "Checked in",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown reservation status: {s}"))
    }
}

/// Reservation entity linking a pet, its guardian and a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub pet_id: String,
    #[serde(alias = "tutorId")]
    pub user_id: String,
    pub hotel_id: String,
    /// YYYY-MM-DD
    pub checkin_date: String,
    /// YYYY-MM-DD
    pub checkout_date: String,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Note recorded with the latest status change (e.g. a rejection reason)
    #[serde(
        default,
        alias = "rejectionReason",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_note: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create reservation payload
///
/// Carries no status: every reservation starts as `PENDING`. A `status` key
/// in incoming JSON is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub pet_id: String,
    pub user_id: String,
    pub hotel_id: String,
    pub checkin_date: String,
    pub checkout_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update reservation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    pub pet_id: Option<String>,
    pub user_id: Option<String>,
    pub hotel_id: Option<String>,
    pub checkin_date: Option<String>,
    pub checkout_date: Option<String>,
    pub status: Option<ReservationStatus>,
    pub notes: Option<String>,
    #[serde(alias = "rejectionReason")]
    pub status_note: Option<String>,
}
