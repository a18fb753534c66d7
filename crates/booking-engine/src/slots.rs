//! Suggest start times where a service can still be booked.
//!
//! Walks the operating hours of a [`DaySnapshot`] in fixed steps from
//! `day_start` and keeps every start where the booking ends by `day_end` and
//! neither the bed check nor the double-booking check fires.

use crate::capacity::bed_conflict;
use crate::conflict::employee_conflict;
use crate::error::{BookingError, Result};
use crate::model::{minutes_to_ms, Candidate, EmployeeId, Minutes, Ms, ReservationId, Service};
use crate::snapshot::DaySnapshot;

/// What to look for: who, which service, how finely to step.
#[derive(Debug, Clone)]
pub struct SlotQuery<'a> {
    pub employee_id: EmployeeId,
    pub service: &'a Service,
    pub step_minutes: Minutes,
    /// Reservation being rescheduled; it does not block its own new slot.
    pub exclude_id: Option<ReservationId>,
}

/// All conflict-free start times for `query` on the snapshot's day, ascending.
///
/// # Errors
/// Returns [`BookingError::InvalidInput`] when `step_minutes` is 0.
pub fn find_open_starts(snapshot: &DaySnapshot, query: &SlotQuery<'_>) -> Result<Vec<Ms>> {
    Ok(open_starts(snapshot, query)?.collect())
}

/// The earliest conflict-free start time for `query`, if any.
///
/// # Errors
/// Returns [`BookingError::InvalidInput`] when `step_minutes` is 0.
pub fn find_first_open_start(snapshot: &DaySnapshot, query: &SlotQuery<'_>) -> Result<Option<Ms>> {
    Ok(open_starts(snapshot, query)?.next())
}

fn open_starts<'a>(
    snapshot: &'a DaySnapshot,
    query: &'a SlotQuery<'a>,
) -> Result<impl Iterator<Item = Ms> + 'a> {
    if query.step_minutes == 0 {
        return Err(BookingError::InvalidInput(
            "step_minutes must be greater than 0".to_string(),
        ));
    }

    let day_start = snapshot.at(snapshot.store.day_start);
    let day_end = snapshot.at(snapshot.store.day_end);
    let step = minutes_to_ms(query.step_minutes);
    let length = minutes_to_ms(query.service.duration_minutes);

    let starts = std::iter::successors(Some(day_start), move |t| Some(t + step))
        .take_while(move |t| t + length <= day_end);

    Ok(starts.filter(move |&start| {
        let candidate = Candidate::new(start, query.employee_id, query.service.clone());
        !employee_conflict(&candidate, &snapshot.reservations, query.exclude_id)
            && !bed_conflict(
                &candidate,
                &snapshot.reservations,
                query.exclude_id,
                &snapshot.store,
            )
    }))
}
