//! Input adapter: the dashboard's REST JSON shape → engine model.
//!
//! A reservation's start arrives as an ISO-8601 `reserved_date`
//! (`2026-03-16T10:00:00.000Z`). A bare `YYYY-MM-DD` date paired with a
//! `start_time` (`HH:MM` or `HH:MM:SS`) is accepted as well. `time` is a duration
//! in minutes, on services and as a per-reservation override.
//!
//! Every instant is read on the store's wall clock. A timestamp's UTC offset is
//! dropped (`10:00:00-07:00` is 10:00), and the wall-clock value is mapped onto
//! epoch milliseconds through UTC. Candidates, operating hours and reservations
//! therefore share one integer time base.
//!
//! Everything is validated here. Negative durations or bed counts, unknown
//! employees and duplicate ids fail fast instead of leaking into the sweep.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::model::{
    Employee, EmployeeId, Minutes, Ms, Reservation, ReservationId, ScheduleEntry, Service,
    ServiceId, StoreConfig,
};
use crate::snapshot::DaySnapshot;

#[derive(Debug, Deserialize)]
struct RawDay {
    date: String,
    store: RawStore,
    #[serde(default)]
    services: Vec<RawService>,
    #[serde(default)]
    employees: Vec<RawEmployee>,
    #[serde(default)]
    schedules: Vec<RawSchedule>,
    #[serde(default)]
    reservations: Vec<RawReservation>,
}

#[derive(Debug, Deserialize)]
struct RawStore {
    total_beds: i64,
    day_start: String,
    day_end: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawService {
    id: ServiceId,
    #[serde(default)]
    name: String,
    /// Duration in minutes.
    #[serde(alias = "duration")]
    time: i64,
    #[serde(default)]
    beds_required: i64,
    #[serde(default)]
    can_overlap: bool,
}

#[derive(Debug, Deserialize)]
struct RawEmployee {
    id: EmployeeId,
    username: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    employee_id: EmployeeId,
    priority: Option<i32>,
    #[serde(default)]
    is_working: bool,
    #[serde(default)]
    on_call: bool,
    start: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReservation {
    id: ReservationId,
    employee_id: EmployeeId,
    reserved_date: Option<String>,
    start_time: Option<String>,
    /// Duration override in minutes.
    #[serde(alias = "duration")]
    time: Option<i64>,
    beds_required: Option<i64>,
    service: Option<RawService>,
    service_id: Option<ServiceId>,
}

/// Parse one day's snapshot from the dashboard JSON.
///
/// # Errors
/// - [`BookingError::Json`] when the document is not valid JSON or misses required fields.
/// - [`BookingError::InvalidInput`] for non-positive durations, negative bed counts,
///   an invalid store, duplicate reservation ids or duplicate schedule entries, and
///   reservations with no start time.
/// - [`BookingError::InvalidTimestamp`] for unparseable dates or times.
/// - [`BookingError::UnknownEmployee`] when a reservation or schedule entry names an
///   employee missing from `employees`.
/// - [`BookingError::UnknownService`] when a reservation's `service_id` is not in `services`.
pub fn parse_day(json: &str) -> Result<DaySnapshot> {
    let raw: RawDay = serde_json::from_str(json)?;

    let date = parse_date(&raw.date)?;
    let store = StoreConfig {
        total_beds: non_negative(raw.store.total_beds, "store total_beds")?,
        day_start: parse_time(&raw.store.day_start)?,
        day_end: parse_time(&raw.store.day_end)?,
    };
    store.validate()?;

    let services = raw
        .services
        .iter()
        .map(convert_service)
        .collect::<Result<Vec<_>>>()?;

    let employees: Vec<Employee> = raw
        .employees
        .into_iter()
        .map(|e| Employee {
            id: e.id,
            username: e.username,
            display_name: e.display_name,
        })
        .collect();
    let roster: HashSet<EmployeeId> = employees.iter().map(|e| e.id).collect();

    let mut scheduled = HashSet::new();
    let mut schedules = Vec::with_capacity(raw.schedules.len());
    for s in raw.schedules {
        if !roster.contains(&s.employee_id) {
            return Err(BookingError::UnknownEmployee {
                owner: "schedule entry".to_string(),
                employee: s.employee_id,
            });
        }
        if !scheduled.insert(s.employee_id) {
            return Err(BookingError::InvalidInput(format!(
                "duplicate schedule entry for employee {}",
                s.employee_id
            )));
        }
        schedules.push(ScheduleEntry {
            employee_id: s.employee_id,
            priority: s.priority,
            is_working: s.is_working,
            on_call: s.on_call,
            start: s.start.as_deref().map(parse_time).transpose()?,
        });
    }

    let mut seen = HashSet::new();
    let mut reservations = Vec::with_capacity(raw.reservations.len());
    for r in &raw.reservations {
        if !seen.insert(r.id) {
            return Err(BookingError::InvalidInput(format!(
                "duplicate reservation id {}",
                r.id
            )));
        }
        if !roster.contains(&r.employee_id) {
            return Err(BookingError::UnknownEmployee {
                owner: format!("reservation {}", r.id),
                employee: r.employee_id,
            });
        }
        reservations.push(convert_reservation(r, date, &services)?);
    }

    debug!(
        %date,
        employees = employees.len(),
        reservations = reservations.len(),
        schedules = schedules.len(),
        "parsed day snapshot"
    );

    Ok(DaySnapshot {
        date,
        store,
        services,
        employees,
        schedules,
        reservations,
    })
}

fn convert_service(raw: &RawService) -> Result<Service> {
    Ok(Service {
        id: raw.id,
        name: raw.name.clone(),
        duration_minutes: positive(raw.time, &format!("service {} time", raw.id))?,
        beds_required: non_negative(
            raw.beds_required,
            &format!("service {} beds_required", raw.id),
        )?,
        can_overlap: raw.can_overlap,
    })
}

fn convert_reservation(
    raw: &RawReservation,
    day: NaiveDate,
    catalog: &[Service],
) -> Result<Reservation> {
    let service = match (&raw.service, raw.service_id) {
        (Some(inline), _) => convert_service(inline)?,
        (None, Some(id)) => catalog
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(BookingError::UnknownService(id))?,
        (None, None) => {
            return Err(BookingError::InvalidInput(format!(
                "reservation {} has neither service nor service_id",
                raw.id
            )))
        }
    };

    let label = format!("reservation {}", raw.id);

    Ok(Reservation {
        id: raw.id,
        employee_id: raw.employee_id,
        start: reservation_start(raw, day)?,
        duration_override: raw
            .time
            .map(|d| positive(d, &format!("{label} time")))
            .transpose()?,
        beds_override: raw
            .beds_required
            .map(|b| non_negative(b, &format!("{label} beds_required")))
            .transpose()?,
        service,
    })
}

/// A full `reserved_date` timestamp wins; otherwise `start_time` on the
/// reservation's date, or on the snapshot's day when `reserved_date` is absent.
fn reservation_start(raw: &RawReservation, day: NaiveDate) -> Result<Ms> {
    if let Some(reserved) = raw.reserved_date.as_deref() {
        if reserved.contains('T') {
            return parse_instant(day, reserved);
        }
    }
    let date = match raw.reserved_date.as_deref() {
        Some(d) => parse_date(d)?,
        None => day,
    };
    let time = raw.start_time.as_deref().ok_or_else(|| {
        BookingError::InvalidInput(format!(
            "reservation {} needs a full reserved_date or a start_time",
            raw.id
        ))
    })?;
    Ok(wall_clock_ms(date, parse_time(time)?))
}

fn positive(value: i64, what: &str) -> Result<Minutes> {
    if value <= 0 {
        return Err(BookingError::InvalidInput(format!(
            "{what} must be positive, got {value}"
        )));
    }
    Minutes::try_from(value)
        .map_err(|_| BookingError::InvalidInput(format!("{what} out of range: {value}")))
}

fn non_negative(value: i64, what: &str) -> Result<u32> {
    if value < 0 {
        return Err(BookingError::InvalidInput(format!(
            "{what} must not be negative, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| BookingError::InvalidInput(format!("{what} out of range: {value}")))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| BookingError::InvalidTimestamp(format!("{s}: {e}")))
}

/// Parse a wall-clock time, `HH:MM:SS` or `HH:MM`.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| BookingError::InvalidTimestamp(format!("{s}: {e}")))
}

/// Parse an ISO-8601 timestamp to its wall-clock reading.
///
/// RFC 3339 (`2026-03-16T10:00:00.000Z`, `2026-03-16T10:00:00-07:00`) keeps the
/// local date and time and drops the offset. Offset-less `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// is taken as is.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| BookingError::InvalidTimestamp(format!("{s}: {e}")))
}

/// Resolve `value` to epoch milliseconds on the store's wall clock.
///
/// A full timestamp (see [`parse_timestamp`]) ignores `date`; a bare
/// time of day lands on `date`.
pub fn parse_instant(date: NaiveDate, value: &str) -> Result<Ms> {
    let value = value.trim();
    if value.contains('T') {
        let dt = parse_timestamp(value)?;
        return Ok(wall_clock_ms(dt.date(), dt.time()));
    }
    Ok(wall_clock_ms(date, parse_time(value)?))
}

/// Epoch milliseconds for a store-local wall-clock instant.
pub fn wall_clock_ms(date: NaiveDate, time: NaiveTime) -> Ms {
    date.and_time(time).and_utc().timestamp_millis()
}

/// Inverse of [`wall_clock_ms`].
pub fn to_wall_clock(ms: Ms) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| BookingError::InvalidTimestamp(format!("{ms} ms is out of range")))
}
