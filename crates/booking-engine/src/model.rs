//! Core reservation model shared by every checker.
//!
//! Instants are epoch milliseconds ([`Ms`]) and durations are whole minutes.
//! Effective duration and bed count always resolve override-then-service.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Unix milliseconds, the only instant type inside the engine.
pub type Ms = i64;

/// Whole-minute durations.
pub type Minutes = u32;

pub type ReservationId = i64;
pub type EmployeeId = i64;
pub type ServiceId = i64;

const MS_PER_MINUTE: Ms = 60_000;

/// Convert a minute duration to the millisecond time base.
pub fn minutes_to_ms(minutes: Minutes) -> Ms {
    Ms::from(minutes) * MS_PER_MINUTE
}

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Span starting at `start` and lasting `minutes`.
    pub fn from_minutes(start: Ms, minutes: Minutes) -> Self {
        Self::new(start, start + minutes_to_ms(minutes))
    }

    /// Touching spans (one ends exactly where the other begins) do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start) / MS_PER_MINUTE
    }
}

/// Immutable catalog entry. Reservations reference it, never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub duration_minutes: Minutes,
    pub beds_required: u32,
    /// Bookings of this service are exempt from the double-booking check.
    pub can_overlap: bool,
}

/// An already-booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub employee_id: EmployeeId,
    pub start: Ms,
    pub duration_override: Option<Minutes>,
    pub beds_override: Option<u32>,
    pub service: Service,
}

impl Reservation {
    pub fn effective_duration(&self) -> Minutes {
        self.duration_override.unwrap_or(self.service.duration_minutes)
    }

    pub fn effective_beds(&self) -> u32 {
        self.beds_override.unwrap_or(self.service.beds_required)
    }

    pub fn span(&self) -> Span {
        Span::from_minutes(self.start, self.effective_duration())
    }
}

/// A proposed reservation: a new booking, or an existing one being moved or resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub start: Ms,
    pub employee_id: EmployeeId,
    pub service: Service,
    pub duration_override: Option<Minutes>,
    pub beds_override: Option<u32>,
}

impl Candidate {
    pub fn new(start: Ms, employee_id: EmployeeId, service: Service) -> Self {
        Self {
            start,
            employee_id,
            service,
            duration_override: None,
            beds_override: None,
        }
    }

    /// Candidate carrying the reservation's current placement and overrides.
    /// Pair it with `exclude_id = Some(reservation.id)` when re-validating an edit.
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            start: reservation.start,
            employee_id: reservation.employee_id,
            service: reservation.service.clone(),
            duration_override: reservation.duration_override,
            beds_override: reservation.beds_override,
        }
    }

    pub fn with_duration(mut self, minutes: Minutes) -> Self {
        self.duration_override = Some(minutes);
        self
    }

    pub fn with_beds(mut self, beds: u32) -> Self {
        self.beds_override = Some(beds);
        self
    }

    /// Same booking dragged to a new start and/or employee column.
    pub fn moved_to(mut self, start: Ms, employee_id: EmployeeId) -> Self {
        self.start = start;
        self.employee_id = employee_id;
        self
    }

    pub fn effective_duration(&self) -> Minutes {
        self.duration_override.unwrap_or(self.service.duration_minutes)
    }

    pub fn effective_beds(&self) -> u32 {
        self.beds_override.unwrap_or(self.service.beds_required)
    }

    pub fn span(&self) -> Span {
        Span::from_minutes(self.start, self.effective_duration())
    }
}

/// Facility-wide constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub total_beds: u32,
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
}

impl StoreConfig {
    /// Reject configurations no day could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.total_beds == 0 {
            return Err(BookingError::InvalidInput(
                "total_beds must be greater than 0".to_string(),
            ));
        }
        if self.day_start >= self.day_end {
            return Err(BookingError::InvalidInput(format!(
                "day_start {} must be before day_end {}",
                self.day_start, self.day_end
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub username: String,
    pub display_name: Option<String>,
}

/// One employee's schedule for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub employee_id: EmployeeId,
    pub priority: Option<i32>,
    pub is_working: bool,
    pub on_call: bool,
    pub start: Option<NaiveTime>,
}
