//! Reservation status lifecycle
//!
//! | From | To |
//! |------|----|
//! | `PENDING` | `APPROVED`, `REJECTED`, `CANCELLED` |
//! | `APPROVED` | `CHECKED_IN`, `CANCELLED` |
//! | `CHECKED_IN` | `COMPLETED` |
//! | `REJECTED`, `COMPLETED`, `CANCELLED` | (terminal) |
//!
//! Under [`TransitionPolicy::Permissive`] any status may move to any other;
//! the graph above is only advisory. [`TransitionPolicy::Guarded`] enforces it.
//! Setting a status to its current value is always allowed.

use crate::repository::{RepoError, RepoResult};
use shared::models::ReservationStatus;

/// How status changes are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status to any status
    #[default]
    Permissive,
    /// Only the edges of the lifecycle graph
    Guarded,
}

impl TransitionPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            TransitionPolicy::Guarded
        } else {
            TransitionPolicy::Permissive
        }
    }
}

/// Forward edges of the lifecycle graph
fn lifecycle_targets(from: ReservationStatus) -> &'static [ReservationStatus] {
    use ReservationStatus::*;
    match from {
        Pending => &[Approved, Rejected, Cancelled],
        Approved => &[CheckedIn, Cancelled],
        CheckedIn => &[Completed],
        Rejected | Completed | Cancelled => &[],
    }
}

/// Whether `from -> to` passes `policy`
pub fn is_allowed(
    policy: TransitionPolicy,
    from: ReservationStatus,
    to: ReservationStatus,
) -> bool {
    match policy {
        TransitionPolicy::Permissive => true,
        TransitionPolicy::Guarded => from == to || lifecycle_targets(from).contains(&to),
    }
}

/// Check `from -> to`, returning [`RepoError::InvalidTransition`] when refused
pub fn check_transition(
    policy: TransitionPolicy,
    from: ReservationStatus,
    to: ReservationStatus,
) -> RepoResult<()> {
    if is_allowed(policy, from, to) {
        Ok(())
    } else {
        Err(RepoError::InvalidTransition { from, to })
    }
}

/// Statuses a reservation in `from` can be moved to (excluding `from` itself),
/// in lifecycle order
pub fn available_targets(
    policy: TransitionPolicy,
    from: ReservationStatus,
) -> Vec<ReservationStatus> {
    ReservationStatus::ALL
        .into_iter()
        .filter(|to| *to != from && is_allowed(policy, from, *to))
        .collect()
}

/// Whether no further lifecycle edge leaves `status`
pub fn is_terminal(status: ReservationStatus) -> bool {
    lifecycle_targets(status).is_empty()
}
