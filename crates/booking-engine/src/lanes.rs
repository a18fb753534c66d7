//! Lane (overlap order) assignment for calendar rendering.
//!
//! Reservations whose spans overlap are laid out side by side. A reservation's
//! lane is its zero-based rank, by `(start, id)`, among every reservation that
//! overlaps it, regardless of employee. The calendar multiplies the lane by a
//! fixed pixel offset. Lanes are a rendering aid only; they carry no bed weight.

use crate::model::{Reservation, ReservationId};

/// Zero-based lane for `target` among the reservations in `all` that overlap it.
///
/// `target` always belongs to its own group, whether or not it appears in `all`.
/// The result is independent of the order of `all`.
pub fn overlap_order(target: &Reservation, all: &[Reservation]) -> usize {
    let span = target.span();
    let key = (target.start, target.id);
    all.iter()
        .filter(|r| r.id != target.id)
        .filter(|r| r.span().overlaps(&span))
        .filter(|r| (r.start, r.id) < key)
        .count()
}

/// Lane for every reservation in `all`, sorted by `(start, id)`.
pub fn assign_lanes(all: &[Reservation]) -> Vec<(ReservationId, usize)> {
    let mut ordered: Vec<&Reservation> = all.iter().collect();
    ordered.sort_by_key(|r| (r.start, r.id));
    ordered
        .into_iter()
        .map(|r| (r.id, overlap_order(r, all)))
        .collect()
}
