//! Interval overlap predicate shared by every checker.
//!
//! Spans are half-open: an appointment ending at 10:00 and another starting at
//! 10:00 do NOT overlap.

use crate::model::{minutes_to_ms, Minutes, Ms};

/// Do `[start_a, start_a + duration_a)` and `[start_b, start_b + duration_b)` overlap?
///
/// Two spans overlap iff `start_a < end_b && start_b < end_a`.
pub fn overlaps(start_a: Ms, duration_a: Minutes, start_b: Ms, duration_b: Minutes) -> bool {
    start_a < start_b + minutes_to_ms(duration_b) && start_b < start_a + minutes_to_ms(duration_a)
}
