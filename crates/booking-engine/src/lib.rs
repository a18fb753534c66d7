//! # booking-engine
//!
//! Resource-conflict checks for spa and clinic reservations.
//!
//! Given a proposed appointment and the day's existing bookings, the engine
//! answers two questions: would it push simultaneous bed demand past the
//! facility's capacity, and would it double-book a staff member? It also
//! computes the rendering helpers that consume the same reservation set: lane
//! indices for overlapping appointments and the order of employee columns.
//!
//! Everything here is a pure function of its arguments. Nothing is stored and
//! nothing is mutated, so checks can run from any thread. Callers re-invoke them
//! after every change to the reservation set.
//!
//! ## Modules
//!
//! - [`model`] — Services, reservations, candidates, store config, schedules
//! - [`overlap`] — Half-open interval overlap predicate
//! - [`conflict`] — Staff double-booking check
//! - [`capacity`] — Bed capacity sweep line and bed usage profile
//! - [`lanes`] — Overlap order (lane) for calendar layout
//! - [`priority`] — Employee column ordering
//! - [`adapter`] — Dashboard JSON → model, with validation
//! - [`snapshot`] — One day's reservation set and combined checks
//! - [`slots`] — Open start times for a service
//! - [`error`] — Error types

pub mod adapter;
pub mod capacity;
pub mod conflict;
pub mod error;
pub mod lanes;
pub mod model;
pub mod overlap;
pub mod priority;
pub mod slots;
pub mod snapshot;

pub use adapter::parse_day;
pub use capacity::{bed_conflict, bed_usage, peak_bed_demand, BedUsage};
pub use conflict::{employee_conflict, find_employee_conflicts};
pub use error::BookingError;
pub use lanes::{assign_lanes, overlap_order};
pub use model::{Candidate, Employee, Reservation, ScheduleEntry, Service, Span, StoreConfig};
pub use overlap::overlaps;
pub use priority::{compare_columns, sort_columns};
pub use slots::{find_first_open_start, find_open_starts, SlotQuery};
pub use snapshot::{ConflictReport, DaySnapshot};
