//! Tests for employee column ordering.

use std::cmp::Ordering;

use booking_engine::model::{Employee, ScheduleEntry};
use booking_engine::{compare_columns, sort_columns};
use chrono::NaiveTime;

fn employee(id: i64, username: &str) -> Employee {
    Employee {
        id,
        username: username.to_string(),
        display_name: None,
    }
}

fn schedule(
    employee_id: i64,
    priority: Option<i32>,
    is_working: bool,
    start: Option<(u32, u32)>,
) -> ScheduleEntry {
    ScheduleEntry {
        employee_id,
        priority,
        is_working,
        on_call: false,
        start: start.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
    }
}

fn usernames(sorted: Vec<&Employee>) -> Vec<&str> {
    sorted.into_iter().map(|e| e.username.as_str()).collect()
}

#[test]
fn scenario_e_priority_then_unscheduled() {
    let employees = vec![employee(1, "a"), employee(2, "b"), employee(3, "c")];
    let schedules = vec![
        schedule(1, Some(2), true, None),
        schedule(2, Some(1), true, None),
    ];

    assert_eq!(usernames(sort_columns(&employees, &schedules)), vec!["b", "a", "c"]);
}

#[test]
fn explicit_priority_beats_working_flag() {
    let employees = vec![employee(1, "worker"), employee(2, "ranked")];
    let schedules = vec![
        schedule(1, None, true, Some((8, 0))),
        schedule(2, Some(5), false, None),
    ];

    assert_eq!(usernames(sort_columns(&employees, &schedules)), vec!["ranked", "worker"]);
}

#[test]
fn working_before_not_working_without_priorities() {
    let employees = vec![employee(1, "aaron"), employee(2, "zoe")];
    let schedules = vec![
        schedule(1, None, false, Some((8, 0))),
        schedule(2, None, true, Some((12, 0))),
    ];

    assert_eq!(usernames(sort_columns(&employees, &schedules)), vec!["zoe", "aaron"]);
}

#[test]
fn earlier_shift_start_first() {
    let employees = vec![employee(1, "late"), employee(2, "early"), employee(3, "unknown")];
    let schedules = vec![
        schedule(1, None, true, Some((13, 0))),
        schedule(2, None, true, Some((9, 0))),
        schedule(3, None, true, None),
    ];

    assert_eq!(
        usernames(sort_columns(&employees, &schedules)),
        vec!["early", "late", "unknown"]
    );
}

#[test]
fn username_breaks_the_final_tie() {
    let employees = vec![employee(1, "mia"), employee(2, "ana"), employee(3, "lee")];

    assert_eq!(usernames(sort_columns(&employees, &[])), vec!["ana", "lee", "mia"]);
}

#[test]
fn equal_priorities_fall_through_to_start_time() {
    let employees = vec![employee(1, "b"), employee(2, "a")];
    let schedules = vec![
        schedule(1, Some(1), true, Some((9, 0))),
        schedule(2, Some(1), true, Some((10, 0))),
    ];

    assert_eq!(usernames(sort_columns(&employees, &schedules)), vec!["b", "a"]);
}

#[test]
fn comparator_is_antisymmetric() {
    let a = employee(1, "a");
    let b = employee(2, "b");
    let sa = schedule(1, Some(3), true, None);

    assert_eq!(compare_columns((&a, Some(&sa)), (&b, None)), Ordering::Less);
    assert_eq!(compare_columns((&b, None), (&a, Some(&sa))), Ordering::Greater);
    assert_eq!(compare_columns((&a, Some(&sa)), (&a, Some(&sa))), Ordering::Equal);
}

#[test]
fn sorting_leaves_inputs_untouched() {
    let employees = vec![employee(1, "z"), employee(2, "a")];
    let before = employees.clone();

    let _ = sort_columns(&employees, &[]);

    assert_eq!(employees, before);
}
