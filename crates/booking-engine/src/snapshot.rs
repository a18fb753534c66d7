//! One day's reservation set, as handed to the engine by the dashboard.
//!
//! A [`DaySnapshot`] is an immutable view: callers re-parse (or rebuild) it
//! after any add, edit or delete before checking again.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::adapter::wall_clock_ms;
use crate::capacity::{self, BedUsage};
use crate::conflict;
use crate::error::{BookingError, Result};
use crate::lanes;
use crate::model::{
    Candidate, Employee, EmployeeId, Ms, Reservation, ReservationId, ScheduleEntry, Service,
    ServiceId, StoreConfig,
};
use crate::priority;

#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub store: StoreConfig,
    /// Service catalog. Reservations may also carry services not listed here.
    pub services: Vec<Service>,
    pub employees: Vec<Employee>,
    pub schedules: Vec<ScheduleEntry>,
    pub reservations: Vec<Reservation>,
}

/// Outcome of checking one candidate against the snapshot.
///
/// The engine only reports; whether a conflict blocks the save or merely warns
/// is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub bed_conflict: bool,
    pub employee_conflict: bool,
    /// Highest simultaneous bed demand over the candidate's span, candidate included.
    pub peak_beds: u32,
    pub total_beds: u32,
    /// Reservations of the same employee the candidate would collide with.
    pub conflicting_reservations: Vec<ReservationId>,
}

impl ConflictReport {
    pub fn has_conflict(&self) -> bool {
        self.bed_conflict || self.employee_conflict
    }
}

impl DaySnapshot {
    /// Epoch milliseconds for `time` on the snapshot's day.
    pub fn at(&self, time: NaiveTime) -> Ms {
        wall_clock_ms(self.date, time)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Look a service up in the catalog, then among the booked reservations.
    pub fn service(&self, id: ServiceId) -> Result<&Service> {
        self.services
            .iter()
            .chain(self.reservations.iter().map(|r| &r.service))
            .find(|s| s.id == id)
            .ok_or(BookingError::UnknownService(id))
    }

    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Build a candidate for `employee_id` booking `service_id` at `time` on this day.
    pub fn candidate(
        &self,
        employee_id: EmployeeId,
        service_id: ServiceId,
        time: NaiveTime,
    ) -> Result<Candidate> {
        if self.employee(employee_id).is_none() {
            return Err(BookingError::UnknownEmployee {
                owner: "candidate".to_string(),
                employee: employee_id,
            });
        }
        let service = self.service(service_id)?.clone();
        Ok(Candidate::new(self.at(time), employee_id, service))
    }

    /// Run both conflict checks for `candidate`.
    pub fn check(&self, candidate: &Candidate, exclude_id: Option<ReservationId>) -> ConflictReport {
        let conflicting: Vec<ReservationId> =
            conflict::find_employee_conflicts(candidate, &self.reservations, exclude_id)
                .into_iter()
                .map(|r| r.id)
                .collect();
        let peak_beds = capacity::peak_bed_demand(candidate, &self.reservations, exclude_id);

        ConflictReport {
            bed_conflict: peak_beds > self.store.total_beds,
            employee_conflict: !conflicting.is_empty(),
            peak_beds,
            total_beds: self.store.total_beds,
            conflicting_reservations: conflicting,
        }
    }

    pub fn lanes(&self) -> Vec<(ReservationId, usize)> {
        lanes::assign_lanes(&self.reservations)
    }

    pub fn columns(&self) -> Vec<&Employee> {
        priority::sort_columns(&self.employees, &self.schedules)
    }

    pub fn bed_usage(&self) -> Vec<BedUsage> {
        capacity::bed_usage(&self.reservations)
    }
}
