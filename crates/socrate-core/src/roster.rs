//! The roster and the per-run exclusion set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entry::RosterEntry;
use crate::error::{RosterError, RosterResult};

/// An ordered, non-empty collection of roster entries with unique indices.
///
/// Order does not affect selection probabilities but is preserved so the
/// roster file is rewritten in the order it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RosterEntry>", into = "Vec<RosterEntry>")]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl TryFrom<Vec<RosterEntry>> for Roster {
    type Error = RosterError;

    fn try_from(entries: Vec<RosterEntry>) -> RosterResult<Self> {
        Self::new(entries)
    }
}

impl From<Roster> for Vec<RosterEntry> {
    fn from(roster: Roster) -> Self {
        roster.entries
    }
}

impl Roster {
    /// Build a roster, rejecting empty input and duplicate indices.
    pub fn new(entries: Vec<RosterEntry>) -> RosterResult<Self> {
        if entries.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.index) {
                return Err(RosterError::DuplicateIndex(entry.index));
            }
        }
        Ok(Self { entries })
    }

    /// All entries in roster order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster has no entries. Always false for a constructed roster.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, RosterEntry> {
        self.entries.iter()
    }

    /// Look up an entry by its index.
    pub fn get(&self, index: u32) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Look up an entry by its index for mutation.
    pub fn get_mut(&mut self, index: u32) -> RosterResult<&mut RosterEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.index == index)
            .ok_or(RosterError::UnknownIndex(index))
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(RosterEntry::weight).sum()
    }

    /// Consume the roster, returning its entries.
    pub fn into_entries(self) -> Vec<RosterEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RosterEntry;
    type IntoIter = std::slice::Iter<'a, RosterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Indices already selected during the current run.
///
/// Excluded entries are skipped by the selector until the set is cleared,
/// which happens automatically once it would exclude everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    indices: BTreeSet<u32>,
}

impl ExclusionSet {
    /// Create an empty exclusion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude an index. Returns false if it was already excluded.
    pub fn insert(&mut self, index: u32) -> bool {
        self.indices.insert(index)
    }

    /// Whether an index is excluded.
    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    /// Make every index eligible again.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Number of excluded indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> Vec<RosterEntry> {
        vec![
            RosterEntry::new(1, "Alpha", "Ann"),
            RosterEntry::new(2, "Beta", "Bob").with_counts(1, 0, 0),
        ]
    }

    #[test]
    fn empty_roster_rejected() {
        assert_eq!(Roster::new(Vec::new()), Err(RosterError::EmptyRoster));
    }

    #[test]
    fn duplicate_index_rejected() {
        let entries = vec![
            RosterEntry::new(4, "One", "A"),
            RosterEntry::new(4, "Two", "B"),
        ];
        assert_eq!(Roster::new(entries), Err(RosterError::DuplicateIndex(4)));
    }

    #[test]
    fn deserializing_validates_like_new() {
        let json = serde_json::to_string(&Roster::new(two()).unwrap()).unwrap();
        assert!(json.starts_with('['));
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);

        let err = serde_json::from_str::<Roster>("[]").unwrap_err();
        assert!(err.to_string().contains("empty"));

        let dup = serde_json::to_string(&[
            RosterEntry::new(3, "One", "A"),
            RosterEntry::new(3, "Two", "B"),
        ])
        .unwrap();
        let err = serde_json::from_str::<Roster>(&dup).unwrap_err();
        assert!(err.to_string().contains("duplicate roster index 3"));
    }

    #[test]
    fn lookup_by_index() {
        let mut roster = Roster::new(two()).unwrap();
        assert_eq!(roster.get(2).unwrap().first_name, "Bob");
        assert!(roster.get(9).is_none());
        roster.get_mut(1).unwrap().mark_absent();
        assert_eq!(roster.get(1).unwrap().count_absent, 1);
        assert_eq!(roster.get_mut(9).unwrap_err(), RosterError::UnknownIndex(9));
    }

    #[test]
    fn total_weight_sums_entries() {
        let roster = Roster::new(two()).unwrap();
        assert!((roster.total_weight() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn order_preserved() {
        let roster = Roster::new(two()).unwrap();
        let indices: Vec<u32> = roster.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn exclusion_set_basics() {
        let mut set = ExclusionSet::new();
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.contains(3));
        assert_eq!(set.len(), 1);
        set.clear();
        assert!(!set.contains(3));
    }
}
