//! Ordering of employee columns in the day calendar.
//!
//! Rules, applied until one breaks the tie:
//!
//! 1. Both have an explicit priority: lower number first.
//! 2. Only one has a priority: it goes first.
//! 3. Working before not working (no schedule counts as not working).
//! 4. Earlier shift start first; a known start beats none.
//! 5. Username, lexicographically.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{Employee, EmployeeId, ScheduleEntry};

/// An employee paired with their schedule for the day, if any.
pub type Column<'a> = (&'a Employee, Option<&'a ScheduleEntry>);

/// Total order over calendar columns.
pub fn compare_columns(a: Column<'_>, b: Column<'_>) -> Ordering {
    let (emp_a, sched_a) = a;
    let (emp_b, sched_b) = b;

    let prio_a = sched_a.and_then(|s| s.priority);
    let prio_b = sched_b.and_then(|s| s.priority);
    let by_priority = match (prio_a, prio_b) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => {
            let working_a = sched_a.is_some_and(|s| s.is_working);
            let working_b = sched_b.is_some_and(|s| s.is_working);
            // `true` must sort first.
            working_b.cmp(&working_a)
        }
    };

    by_priority
        .then_with(|| {
            let start_a = sched_a.and_then(|s| s.start);
            let start_b = sched_b.and_then(|s| s.start);
            match (start_a, start_b) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
        .then_with(|| emp_a.username.cmp(&emp_b.username))
}

/// Employees in column order. Inputs are left untouched.
///
/// `schedules` holds at most one entry per employee for the day; employees
/// without an entry sort as unscheduled.
pub fn sort_columns<'a>(
    employees: &'a [Employee],
    schedules: &'a [ScheduleEntry],
) -> Vec<&'a Employee> {
    let by_employee: HashMap<EmployeeId, &ScheduleEntry> =
        schedules.iter().map(|s| (s.employee_id, s)).collect();

    let mut columns: Vec<Column<'a>> = employees
        .iter()
        .map(|e| (e, by_employee.get(&e.id).copied()))
        .collect();
    columns.sort_by(|a, b| compare_columns(*a, *b));
    columns.into_iter().map(|(e, _)| e).collect()
}
