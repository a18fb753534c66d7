//! Shared bed capacity checks via a weighted sweep line.
//!
//! Every reservation that needs beds contributes a `+beds` event at its start and
//! a `-beds` event at its end. Walking the events in time order gives the
//! simultaneous bed demand at every instant of the day.
//!
//! Events at the same instant are processed ends-first, so back-to-back bookings
//! (one ends at 11:00, the next starts at 11:00) never share a bed.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{Candidate, Ms, Reservation, ReservationId, Span, StoreConfig};

/// Which side of an interval an event marks. `End` sorts before `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EdgeKind {
    End,
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    at: Ms,
    kind: EdgeKind,
    beds: i64,
}

/// A stretch of time with constant, non-zero bed demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedUsage {
    pub span: Span,
    pub beds: u32,
}

/// Would inserting `candidate` push simultaneous bed demand above
/// `store.total_beds` at any instant?
///
/// `exclude_id` names the reservation being edited so it is not counted
/// against itself.
pub fn bed_conflict(
    candidate: &Candidate,
    existing: &[Reservation],
    exclude_id: Option<ReservationId>,
    store: &StoreConfig,
) -> bool {
    let peak = peak_bed_demand(candidate, existing, exclude_id);
    let conflict = peak > store.total_beds;
    if conflict {
        debug!(
            start = candidate.start,
            peak,
            total_beds = store.total_beds,
            "bed capacity exceeded"
        );
    }
    conflict
}

/// Highest simultaneous bed demand over the candidate's span, candidate included.
///
/// Returns 0 when the candidate needs no bed. A zero-length candidate still
/// sweeps: its end edge sorts before its start edge, so the peak is the demand
/// already present at that instant.
pub fn peak_bed_demand(
    candidate: &Candidate,
    existing: &[Reservation],
    exclude_id: Option<ReservationId>,
) -> u32 {
    let beds = candidate.effective_beds();
    if beds == 0 {
        return 0;
    }
    let span = candidate.span();

    // Reservations that don't touch the candidate's span can't change the
    // maximum inside it; dropping them only bounds the event set. An empty span
    // touches whatever is active at its instant.
    let touches = |s: &Span| {
        if span.start == span.end {
            s.contains_instant(span.start)
        } else {
            s.overlaps(&span)
        }
    };
    let mut edges: Vec<Edge> = existing
        .iter()
        .filter(|r| Some(r.id) != exclude_id)
        .filter(|r| r.effective_beds() > 0)
        .map(|r| (r.span(), r.effective_beds()))
        .filter(|(s, _)| touches(s))
        .flat_map(|(s, b)| edges_for(s, b))
        .collect();
    edges.extend(edges_for(span, beds));

    let peak = sweep_peak(&mut edges);
    trace!(edges = edges.len(), peak, "bed sweep finished");
    peak
}

/// Step profile of bed demand across `reservations`.
///
/// Returns sorted, non-overlapping segments with constant non-zero demand.
/// Adjacent segments always carry different bed counts.
pub fn bed_usage(reservations: &[Reservation]) -> Vec<BedUsage> {
    let mut edges: Vec<Edge> = reservations
        .iter()
        .filter(|r| r.effective_beds() > 0)
        .map(|r| (r.span(), r.effective_beds()))
        .filter(|(s, _)| s.start < s.end)
        .flat_map(|(s, b)| edges_for(s, b))
        .collect();
    edges.sort_by_key(|e| (e.at, e.kind));

    let mut usage: Vec<BedUsage> = Vec::new();
    let mut active: i64 = 0;
    let mut i = 0;
    while i < edges.len() {
        let at = edges[i].at;
        while i < edges.len() && edges[i].at == at {
            active += delta(&edges[i]);
            i += 1;
        }
        if active <= 0 || i == edges.len() {
            continue;
        }
        let next = edges[i].at;
        let beds = u32::try_from(active).unwrap_or(u32::MAX);
        match usage.last_mut() {
            Some(last) if last.span.end == at && last.beds == beds => last.span.end = next,
            _ => usage.push(BedUsage {
                span: Span::new(at, next),
                beds,
            }),
        }
    }

    usage
}

/// Segments where existing demand already exceeds the store's bed count,
/// e.g. after a user force-saved past a warning.
pub fn overbooked_spans(reservations: &[Reservation], store: &StoreConfig) -> Vec<BedUsage> {
    bed_usage(reservations)
        .into_iter()
        .filter(|u| u.beds > store.total_beds)
        .collect()
}

fn edges_for(span: Span, beds: u32) -> [Edge; 2] {
    let beds = i64::from(beds);
    [
        Edge {
            at: span.start,
            kind: EdgeKind::Start,
            beds,
        },
        Edge {
            at: span.end,
            kind: EdgeKind::End,
            beds,
        },
    ]
}

fn delta(edge: &Edge) -> i64 {
    match edge.kind {
        EdgeKind::Start => edge.beds,
        EdgeKind::End => -edge.beds,
    }
}

/// Sort `edges` (ends before starts on ties) and return the maximum running total.
fn sweep_peak(edges: &mut [Edge]) -> u32 {
    edges.sort_by_key(|e| (e.at, e.kind));

    let mut active: i64 = 0;
    let mut peak: i64 = 0;
    for edge in edges.iter() {
        active += delta(edge);
        if edge.kind == EdgeKind::Start {
            peak = peak.max(active);
        }
    }
    u32::try_from(peak).unwrap_or(u32::MAX)
}
