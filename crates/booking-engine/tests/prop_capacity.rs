//! Property-based tests for the conflict checks and lane assignment.
//!
//! These verify invariants that should hold for *any* reservation set, not just
//! the hand-picked scenarios in the other test files.

use booking_engine::model::{minutes_to_ms, Candidate, Ms, Reservation, Service, StoreConfig};
use booking_engine::{
    assign_lanes, bed_conflict, employee_conflict, overlap_order, overlaps, peak_bed_demand,
};
use chrono::NaiveTime;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Day origin: 2026-03-16T09:00:00Z.
const ORIGIN: Ms = 1_773_651_600_000;

fn arb_service() -> impl Strategy<Value = Service> {
    (1u32..=8, 0u32..=3, any::<bool>()).prop_map(|(quarters, beds, can_overlap)| Service {
        id: i64::from(quarters),
        name: "Treatment".to_string(),
        duration_minutes: quarters * 15,
        beds_required: beds,
        can_overlap,
    })
}

/// Reservations on a 15-minute grid over a ten-hour day, with occasional overrides.
fn arb_reservations() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec(
        (
            0u32..40,
            1i64..=4,
            arb_service(),
            prop::option::weighted(0.2, 1u32..=8),
            prop::option::weighted(0.2, 0u32..=3),
        ),
        0..25,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (slot, employee_id, service, dur, beds))| Reservation {
                id: i as i64 + 1,
                employee_id,
                start: ORIGIN + minutes_to_ms(slot * 15),
                duration_override: dur.map(|q| q * 15),
                beds_override: beds,
                service,
            })
            .collect()
    })
}

fn arb_candidate() -> impl Strategy<Value = Candidate> {
    (0u32..40, 1i64..=4, arb_service())
        .prop_map(|(slot, employee_id, service)| {
            Candidate::new(ORIGIN + minutes_to_ms(slot * 15), employee_id, service)
        })
}

fn store(total_beds: u32) -> StoreConfig {
    StoreConfig {
        total_beds,
        day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        day_end: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bed demand at instant `t`, by brute-force summation.
fn demand_at(reservations: &[Reservation], t: Ms) -> u32 {
    reservations
        .iter()
        .filter(|r| r.span().contains_instant(t))
        .map(|r| r.effective_beds())
        .sum()
}

/// The candidate as the reservation it would become.
fn as_reservation(candidate: &Candidate, id: i64) -> Reservation {
    Reservation {
        id,
        employee_id: candidate.employee_id,
        start: candidate.start,
        duration_override: candidate.duration_override,
        beds_override: candidate.beds_override,
        service: candidate.service.clone(),
    }
}

// ---------------------------------------------------------------------------
// Property 1: the sweep agrees with brute-force sampling
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn sweep_peak_matches_brute_force(
        existing in arb_reservations(),
        candidate in arb_candidate(),
    ) {
        let peak = peak_bed_demand(&candidate, &existing, None);

        if candidate.effective_beds() == 0 {
            prop_assert_eq!(peak, 0);
        } else {
            // Demand only changes at interval starts, so the maximum over the
            // candidate's span is reached at its own start or at a start inside it.
            let span = candidate.span();
            let mut all = existing.clone();
            all.push(as_reservation(&candidate, 0));
            let brute = std::iter::once(span.start)
                .chain(existing.iter().map(|r| r.start).filter(|&t| span.contains_instant(t)))
                .map(|t| demand_at(&all, t))
                .max()
                .unwrap_or(0);
            prop_assert_eq!(peak, brute);
        }
    }

    #[test]
    fn chronological_inserts_never_exceed_capacity(
        proposed in arb_reservations(),
        total_beds in 1u32..=5,
    ) {
        let store = store(total_beds);
        let mut sorted = proposed;
        sorted.sort_by_key(|r| (r.start, r.id));

        let mut accepted: Vec<Reservation> = Vec::new();
        for r in sorted {
            if !bed_conflict(&Candidate::from_reservation(&r), &accepted, None, &store) {
                accepted.push(r);
            }
        }

        for r in &accepted {
            prop_assert!(
                demand_at(&accepted, r.start) <= total_beds,
                "demand {} exceeds {} beds at {}",
                demand_at(&accepted, r.start),
                total_beds,
                r.start
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: touching intervals never overlap or stack
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn touching_intervals_are_disjoint(
        slot in 0u32..40,
        first in 1u32..=120,
        second in 1u32..=120,
        beds in 1u32..=3,
    ) {
        let start = ORIGIN + minutes_to_ms(slot * 15);
        let boundary = start + minutes_to_ms(first);
        prop_assert!(!overlaps(start, first, boundary, second));
        prop_assert!(!overlaps(boundary, second, start, first));

        let service = Service {
            id: 1,
            name: "Treatment".to_string(),
            duration_minutes: first,
            beds_required: beds,
            can_overlap: false,
        };
        let existing = vec![Reservation {
            id: 1,
            employee_id: 1,
            start,
            duration_override: None,
            beds_override: None,
            service: service.clone(),
        }];
        let next = Candidate::new(boundary, 1, service).with_duration(second);

        prop_assert_eq!(peak_bed_demand(&next, &existing, None), beds);
        prop_assert!(!bed_conflict(&next, &existing, None, &store(beds)));
        prop_assert!(!employee_conflict(&next, &existing, None));
    }
}

// ---------------------------------------------------------------------------
// Property 3: excluding a reservation is the same as removing it
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn exclusion_equals_removal(
        existing in arb_reservations(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!existing.is_empty());
        let target = &existing[pick.index(existing.len())];
        let edited = Candidate::from_reservation(target);
        let without: Vec<Reservation> = existing
            .iter()
            .filter(|r| r.id != target.id)
            .cloned()
            .collect();

        prop_assert_eq!(
            peak_bed_demand(&edited, &existing, Some(target.id)),
            peak_bed_demand(&edited, &without, None)
        );
        prop_assert_eq!(
            employee_conflict(&edited, &existing, Some(target.id)),
            employee_conflict(&edited, &without, None)
        );
    }
}

// ---------------------------------------------------------------------------
// Properties 4 and 5: input order doesn't matter
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn employee_conflict_ignores_input_order(
        existing in arb_reservations(),
        candidate in arb_candidate(),
        rotate in 0usize..25,
    ) {
        let expected = employee_conflict(&candidate, &existing, None);

        let mut reordered = existing.clone();
        reordered.reverse();
        if !reordered.is_empty() {
            let k = rotate % reordered.len();
            reordered.rotate_left(k);
        }

        prop_assert_eq!(employee_conflict(&candidate, &reordered, None), expected);
    }

    #[test]
    fn lanes_ignore_input_order(
        existing in arb_reservations(),
        rotate in 0usize..25,
    ) {
        let expected = assign_lanes(&existing);

        let mut reordered = existing.clone();
        reordered.reverse();
        if !reordered.is_empty() {
            let k = rotate % reordered.len();
            reordered.rotate_left(k);
        }

        prop_assert_eq!(assign_lanes(&reordered), expected);
        for r in &existing {
            prop_assert_eq!(overlap_order(r, &existing), overlap_order(r, &reordered));
        }
    }

    #[test]
    fn same_start_reservations_never_share_a_lane(existing in arb_reservations()) {
        let lanes = assign_lanes(&existing);
        let lane_of = |id: i64| lanes.iter().find(|(rid, _)| *rid == id).map(|(_, l)| *l);

        for a in &existing {
            for b in &existing {
                if a.id < b.id && a.start == b.start {
                    prop_assert_ne!(lane_of(a.id), lane_of(b.id));
                }
            }
        }
    }
}
