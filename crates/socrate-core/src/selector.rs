//! Weighted random selection over a roster.
//!
//! A draw picks a target uniformly in `[0, total)` and walks the eligible
//! entries in roster order, subtracting each weight until the running value
//! drops to zero or below. The total and the walk always iterate the same
//! eligible entries in the same order, so the walk can only run off the end
//! through floating-point drift.

use rand::Rng;
use tracing::{debug, error, info};

use crate::entry::RosterEntry;
use crate::error::{RosterError, RosterResult};
use crate::roster::{ExclusionSet, Roster};

/// The outcome of one weighted draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    /// Index of the selected entry.
    pub index: u32,
    /// Position of the selected entry within the roster.
    pub position: usize,
    /// The exclusion set covered everyone and was cleared before drawing.
    pub cycle_reset: bool,
    /// The walk ran off the end and fell back to the last eligible entry.
    pub drifted: bool,
}

fn eligible<'a>(
    roster: &'a Roster,
    exclusion: &'a ExclusionSet,
) -> impl Iterator<Item = (usize, &'a RosterEntry)> + 'a {
    roster
        .iter()
        .enumerate()
        .filter(move |(_, e)| !exclusion.contains(e.index))
}

/// Total weight of the entries not in `exclusion`.
pub fn eligible_weight(roster: &Roster, exclusion: &ExclusionSet) -> f64 {
    eligible(roster, exclusion).map(|(_, e)| e.weight()).sum()
}

/// Select the entry a given target lands on.
///
/// `target` must lie in `[0, total)`, where `total` is the eligible weight;
/// anything else means the caller's total disagrees with the roster and is
/// reported as [`RosterError::TargetOutOfRange`].
pub fn pick_at(roster: &Roster, exclusion: &ExclusionSet, target: f64) -> RosterResult<Draw> {
    let total = eligible_weight(roster, exclusion);
    if total <= 0.0 {
        return Err(RosterError::EmptyRoster);
    }
    if !(0.0..total).contains(&target) {
        return Err(RosterError::TargetOutOfRange { target, total });
    }

    let mut remaining = target;
    let mut last = None;
    for (position, entry) in eligible(roster, exclusion) {
        remaining -= entry.weight();
        last = Some((position, entry));
        if remaining <= 0.0 {
            return Ok(Draw {
                index: entry.index,
                position,
                cycle_reset: false,
                drifted: false,
            });
        }
    }

    let (position, entry) = last.ok_or(RosterError::EmptyRoster)?;
    error!(
        draw_target = target,
        total,
        remaining,
        index = entry.index,
        "weighted walk ran off the end; falling back to last eligible entry"
    );
    Ok(Draw {
        index: entry.index,
        position,
        cycle_reset: false,
        drifted: true,
    })
}

/// Perform one weighted random draw.
///
/// Entries in `exclusion` are skipped. If that leaves nothing eligible the
/// exclusion set is cleared and the draw proceeds over the whole roster.
pub fn draw<R: Rng + ?Sized>(
    roster: &Roster,
    exclusion: &mut ExclusionSet,
    rng: &mut R,
) -> RosterResult<Draw> {
    let mut cycle_reset = false;
    let mut total = eligible_weight(roster, exclusion);
    if total <= 0.0 && !exclusion.is_empty() {
        info!(excluded = exclusion.len(), "everyone excluded; starting a new cycle");
        exclusion.clear();
        cycle_reset = true;
        total = eligible_weight(roster, exclusion);
    }
    if total <= 0.0 {
        return Err(RosterError::EmptyRoster);
    }

    let target = rng.random_range(0.0..total);
    let mut picked = pick_at(roster, exclusion, target)?;
    picked.cycle_reset = cycle_reset;
    debug!(draw_target = target, total, index = picked.index, "drew roster entry");
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pair() -> Roster {
        Roster::new(vec![
            RosterEntry::new(1, "Alpha", "A"),
            RosterEntry::new(2, "Beta", "B").with_counts(1, 0, 0),
        ])
        .unwrap()
    }

    fn class() -> Roster {
        Roster::new(vec![
            RosterEntry::new(10, "Curie", "Marie"),
            RosterEntry::new(11, "Bohr", "Niels").with_counts(1, 0, 0),
            RosterEntry::new(12, "Dirac", "Paul").with_counts(2, 3, 0),
            RosterEntry::new(13, "Meitner", "Lise").with_counts(0, 0, 2),
        ])
        .unwrap()
    }

    #[test]
    fn target_inside_first_weight_selects_first() {
        let d = pick_at(&pair(), &ExclusionSet::new(), 0.5).unwrap();
        assert_eq!(d.index, 1);
        assert!(!d.drifted);
    }

    #[test]
    fn target_past_first_weight_selects_second() {
        let d = pick_at(&pair(), &ExclusionSet::new(), 1.1).unwrap();
        assert_eq!(d.index, 2);
        assert_eq!(d.position, 1);
    }

    #[test]
    fn boundary_target_selects_entry_it_exhausts() {
        // 1.0 - 1.0 == 0.0, which counts as crossing.
        let d = pick_at(&pair(), &ExclusionSet::new(), 1.0).unwrap();
        assert_eq!(d.index, 1);
        let d = pick_at(&pair(), &ExclusionSet::new(), 0.0).unwrap();
        assert_eq!(d.index, 1);
    }

    #[test]
    fn target_out_of_range_is_an_error() {
        let err = pick_at(&pair(), &ExclusionSet::new(), 1.25).unwrap_err();
        assert!(matches!(err, RosterError::TargetOutOfRange { .. }));
        let err = pick_at(&pair(), &ExclusionSet::new(), -0.1).unwrap_err();
        assert!(matches!(err, RosterError::TargetOutOfRange { .. }));
    }

    #[test]
    fn walk_running_off_the_end_falls_back_to_last_entry() {
        // Rounding in the running subtraction leaves a sliver above zero
        // for the largest target just below this roster's total.
        let counts = [
            (19, 2, 7),
            (17, 17, 17),
            (9, 11, 4),
            (1, 19, 13),
            (9, 0, 3),
            (14, 1, 5),
            (19, 12, 16),
        ];
        let roster = Roster::new(
            (1..)
                .zip(counts)
                .map(|(i, (c, f, a))| RosterEntry::new(i, "Drift", "D").with_counts(c, f, a))
                .collect(),
        )
        .unwrap();
        let exclusion = ExclusionSet::new();
        let total = eligible_weight(&roster, &exclusion);
        let target = f64::from_bits(total.to_bits() - 1);

        let d = pick_at(&roster, &exclusion, target).unwrap();
        assert!(d.drifted);
        assert_eq!(d.index, 7);
        assert_eq!(d.position, 6);
        assert!(!d.cycle_reset);
    }

    #[test]
    fn drift_fallback_skips_excluded_tail() {
        let roster = Roster::new(vec![
            RosterEntry::new(1, "A", "A").with_counts(0, 1, 4),
            RosterEntry::new(2, "B", "B").with_counts(2, 1, 1),
            RosterEntry::new(3, "C", "C").with_counts(2, 0, 1),
            RosterEntry::new(4, "D", "D").with_counts(5, 2, 4),
            RosterEntry::new(5, "E", "E"),
        ])
        .unwrap();
        let mut exclusion = ExclusionSet::new();
        exclusion.insert(5);
        let total = eligible_weight(&roster, &exclusion);
        let target = f64::from_bits(total.to_bits() - 1);

        let d = pick_at(&roster, &exclusion, target).unwrap();
        assert!(d.drifted);
        assert_eq!(d.index, 4);
        assert_eq!(d.position, 3);
    }

    #[test]
    fn excluded_entries_are_skipped_in_total_and_walk() {
        let mut exclusion = ExclusionSet::new();
        exclusion.insert(1);
        assert!((eligible_weight(&pair(), &exclusion) - 0.25).abs() < f64::EPSILON);
        let d = pick_at(&pair(), &exclusion, 0.1).unwrap();
        assert_eq!(d.index, 2);
    }

    #[test]
    fn excluded_entry_never_drawn() {
        let roster = class();
        let mut rng = StdRng::seed_from_u64(7);
        let mut exclusion = ExclusionSet::new();
        exclusion.insert(13);
        exclusion.insert(10);
        for _ in 0..1000 {
            let d = draw(&roster, &mut exclusion, &mut rng).unwrap();
            assert!(d.index == 11 || d.index == 12);
            assert!(!d.cycle_reset);
        }
        assert_eq!(exclusion.len(), 2);
    }

    #[test]
    fn full_exclusion_resets_cycle() {
        let roster = class();
        let mut rng = StdRng::seed_from_u64(1);
        let mut exclusion = ExclusionSet::new();
        for e in &roster {
            exclusion.insert(e.index);
        }
        let d = draw(&roster, &mut exclusion, &mut rng).unwrap();
        assert!(d.cycle_reset);
        assert!(exclusion.is_empty());
    }

    #[test]
    fn sampling_without_replacement_visits_everyone() {
        let roster = class();
        let mut rng = StdRng::seed_from_u64(99);
        let mut exclusion = ExclusionSet::new();
        let mut seen = Vec::new();
        for _ in 0..roster.len() {
            let d = draw(&roster, &mut exclusion, &mut rng).unwrap();
            assert!(!d.cycle_reset);
            exclusion.insert(d.index);
            seen.push(d.index);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![10, 11, 12, 13]);
        let d = draw(&roster, &mut exclusion, &mut rng).unwrap();
        assert!(d.cycle_reset);
    }

    #[test]
    fn frequencies_converge_to_weights() {
        let roster = class();
        let total = roster.total_weight();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut exclusion = ExclusionSet::new();
        let n = 200_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            let d = draw(&roster, &mut exclusion, &mut rng).unwrap();
            counts[d.position] += 1;
        }
        for (i, entry) in roster.iter().enumerate() {
            let p = entry.weight() / total;
            let observed = counts[i] as f64 / n as f64;
            let sigma = (p * (1.0 - p) / n as f64).sqrt();
            assert!(
                (observed - p).abs() < 5.0 * sigma,
                "entry {}: observed {observed}, expected {p}",
                entry.index
            );
        }
    }

    #[test]
    fn single_entry_always_drawn() {
        let roster = Roster::new(vec![RosterEntry::new(5, "Solo", "Han")]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut exclusion = ExclusionSet::new();
        for _ in 0..10 {
            assert_eq!(draw(&roster, &mut exclusion, &mut rng).unwrap().index, 5);
        }
    }

    proptest! {
        #[test]
        fn prop_every_target_in_range_selects_eligible(fraction in 0.0f64..1.0, skip in 0usize..4) {
            let roster = class();
            let mut exclusion = ExclusionSet::new();
            exclusion.insert(roster.entries()[skip].index);
            let total = eligible_weight(&roster, &exclusion);
            let d = pick_at(&roster, &exclusion, fraction * total).unwrap();
            prop_assert!(!exclusion.contains(d.index));
            prop_assert!(!d.drifted);
        }
    }
}
