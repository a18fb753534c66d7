//! Detect staff double-booking.
//!
//! A candidate collides with an existing reservation when both belong to the same
//! employee, their spans overlap, and neither side is exempt. Adjacent bookings
//! (one ends exactly when the other starts) are NOT conflicts.
//!
//! The exemption is asymmetric: when the candidate's own service has
//! `can_overlap`, the check short-circuits without looking at the other
//! reservation's service. When the candidate's service forbids overlap, only
//! existing reservations whose service also forbids overlap are counted.

use tracing::debug;

use crate::model::{Candidate, Reservation, ReservationId};
use crate::overlap::overlaps;

/// Would `candidate` double-book its employee?
///
/// `exclude_id` names the reservation being edited so it is not counted
/// against itself. The result does not depend on the order of `existing`.
pub fn employee_conflict(
    candidate: &Candidate,
    existing: &[Reservation],
    exclude_id: Option<ReservationId>,
) -> bool {
    !find_employee_conflicts(candidate, existing, exclude_id).is_empty()
}

/// Every existing reservation that `candidate` would collide with, in input order.
pub fn find_employee_conflicts<'a>(
    candidate: &Candidate,
    existing: &'a [Reservation],
    exclude_id: Option<ReservationId>,
) -> Vec<&'a Reservation> {
    if candidate.service.can_overlap {
        return Vec::new();
    }

    let duration = candidate.effective_duration();
    let conflicts: Vec<&Reservation> = existing
        .iter()
        .filter(|r| Some(r.id) != exclude_id)
        .filter(|r| !r.service.can_overlap)
        .filter(|r| overlaps(r.start, r.effective_duration(), candidate.start, duration))
        .filter(|r| r.employee_id == candidate.employee_id)
        .collect();

    if !conflicts.is_empty() {
        debug!(
            employee_id = candidate.employee_id,
            start = candidate.start,
            count = conflicts.len(),
            "employee double-booking detected"
        );
    }

    conflicts
}
