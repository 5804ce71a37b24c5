//! core::reconcile
//!
//! Restores cross-record invariants of the hero collection.
//!
//! # Invariants restored
//!
//! - **Symmetry**: `B ∈ A.counters` iff `A ∈ B.countered_by`
//! - **Referential integrity**: every name in `counters`, `countered_by`,
//!   `synergy` and `ban_targets` is an existing hero, and never the hero
//!   itself
//! - **Record shape**: each record's own invariants (see
//!   [`HeroRecord::normalize`])
//!
//! # Algorithm
//!
//! 1. Normalize every record.
//! 2. Drop dangling and self references from every relationship field.
//! 3. Mirror `counters` into `countered_by` and back, one hop only.
//!
//! Additions in step 3 are computed against the state after step 2 and
//! applied afterwards, so the result does not depend on iteration order.
//! The pass is idempotent: a second run reports zero changes.
//!
//! # Example
//!
//! ```
//! use herodex::core::model::HeroRecord;
//! use herodex::core::reconcile::reconcile;
//! use herodex::core::types::HeroName;
//! use std::collections::BTreeMap;
//!
//! let a = HeroName::new("A").unwrap();
//! let b = HeroName::new("B").unwrap();
//!
//! let mut heroes = BTreeMap::new();
//! let mut rec_a = HeroRecord::new();
//! rec_a.counters.insert(b.clone());
//! heroes.insert(a.clone(), rec_a);
//! heroes.insert(b.clone(), HeroRecord::new());
//!
//! let report = reconcile(&mut heroes);
//! assert_eq!(report.changes(), 1);
//! assert!(heroes[&b].countered_by.contains(&a));
//!
//! assert_eq!(reconcile(&mut heroes).changes(), 0);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use super::model::{HeroRecord, RelationField};
use super::types::HeroName;

/// Counts of corrective edits made by one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// References to heroes that do not exist.
    pub dangling_dropped: usize,
    /// References from a hero to itself.
    pub self_refs_dropped: usize,
    /// Missing mirror entries added between `counters` and `countered_by`.
    pub mirrors_added: usize,
}

impl ReconcileReport {
    /// Total number of corrective edits.
    pub fn changes(&self) -> usize {
        self.dangling_dropped + self.self_refs_dropped + self.mirrors_added
    }

    /// True when the collection was already consistent.
    pub fn is_clean(&self) -> bool {
        self.changes() == 0
    }
}

impl std::fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} relationships repaired ({} dangling, {} self, {} mirrored)",
            self.changes(),
            self.dangling_dropped,
            self.self_refs_dropped,
            self.mirrors_added
        )
    }
}

/// Reconcile the hero collection in place.
///
/// Cannot fail; malformed entries are dropped.
pub fn reconcile(heroes: &mut BTreeMap<HeroName, HeroRecord>) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let known: BTreeSet<HeroName> = heroes.keys().cloned().collect();

    for (name, record) in heroes.iter_mut() {
        record.normalize();
        for field in RelationField::ALL {
            record.relation_mut(field).retain(|other| {
                if other == name {
                    report.self_refs_dropped += 1;
                    false
                } else if !known.contains(other) {
                    report.dangling_dropped += 1;
                    false
                } else {
                    true
                }
            });
        }
    }

    for (target, field, name) in missing_mirrors(heroes) {
        if let Some(record) = heroes.get_mut(&target) {
            if record.relation_mut(field).insert(name) {
                report.mirrors_added += 1;
            }
        }
    }

    if !report.is_clean() {
        log::debug!("reconcile: {}", report);
    }
    report
}

/// Check the invariants without modifying anything.
///
/// Returns the report a [`reconcile`] call would produce.
pub fn audit(heroes: &BTreeMap<HeroName, HeroRecord>) -> ReconcileReport {
    let mut scratch = heroes.clone();
    reconcile(&mut scratch)
}

/// Mirror entries that are missing, as `(target, field, name)` meaning
/// "`name` belongs in `target.field`".
fn missing_mirrors(
    heroes: &BTreeMap<HeroName, HeroRecord>,
) -> Vec<(HeroName, RelationField, HeroName)> {
    let mut missing = Vec::new();

    for (name, record) in heroes {
        for (field, mirror) in [
            (RelationField::Counters, RelationField::CounteredBy),
            (RelationField::CounteredBy, RelationField::Counters),
        ] {
            for other in record.relation(field) {
                let mirrored = heroes
                    .get(other)
                    .is_some_and(|rec| rec.relation(mirror).contains(name));
                if !mirrored {
                    missing.push((other.clone(), mirror, name.clone()));
                }
            }
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Lane;

    fn name(s: &str) -> HeroName {
        HeroName::new(s).unwrap()
    }

    fn heroes(names: &[&str]) -> BTreeMap<HeroName, HeroRecord> {
        names
            .iter()
            .map(|n| (name(n), HeroRecord::new()))
            .collect()
    }

    #[test]
    fn empty_collection_is_clean() {
        let mut map = BTreeMap::new();
        assert!(reconcile(&mut map).is_clean());
    }

    #[test]
    fn counters_mirrored_into_countered_by() {
        let mut map = heroes(&["A", "B"]);
        map.get_mut("A").unwrap().counters.insert(name("B"));

        let report = reconcile(&mut map);

        assert_eq!(report.changes(), 1);
        assert_eq!(report.mirrors_added, 1);
        assert_eq!(map["A"].counters, [name("B")].into_iter().collect());
        assert_eq!(map["B"].countered_by, [name("A")].into_iter().collect());
    }

    #[test]
    fn countered_by_mirrored_into_counters() {
        let mut map = heroes(&["A", "B"]);
        map.get_mut("A").unwrap().countered_by.insert(name("B"));

        assert_eq!(reconcile(&mut map).changes(), 1);
        assert!(map["B"].counters.contains("A"));
    }

    #[test]
    fn dangling_reference_dropped() {
        let mut map = heroes(&["A"]);
        map.get_mut("A").unwrap().counters.insert(name("B"));

        let report = reconcile(&mut map);

        assert_eq!(report.dangling_dropped, 1);
        assert_eq!(report.changes(), 1);
        assert!(map["A"].counters.is_empty());
    }

    #[test]
    fn self_reference_dropped_from_every_field() {
        let mut map = heroes(&["A"]);
        {
            let a = map.get_mut("A").unwrap();
            a.counters.insert(name("A"));
            a.countered_by.insert(name("A"));
            a.synergy.insert(name("A"));
            a.ban_targets.insert(name("A"));
        }

        let report = reconcile(&mut map);

        assert_eq!(report.self_refs_dropped, 4);
        for field in RelationField::ALL {
            assert!(map["A"].relation(field).is_empty());
        }
    }

    #[test]
    fn synergy_and_ban_targets_are_not_mirrored() {
        let mut map = heroes(&["A", "B"]);
        map.get_mut("A").unwrap().synergy.insert(name("B"));
        map.get_mut("A").unwrap().ban_targets.insert(name("B"));

        assert!(reconcile(&mut map).is_clean());
        assert!(map["B"].synergy.is_empty());
        assert!(map["B"].ban_targets.is_empty());
    }

    #[test]
    fn mutual_mismatch_repaired_both_ways() {
        let mut map = heroes(&["A", "B", "C"]);
        map.get_mut("A").unwrap().counters.insert(name("B"));
        map.get_mut("C").unwrap().countered_by.insert(name("B"));

        let report = reconcile(&mut map);

        assert_eq!(report.mirrors_added, 2);
        assert!(map["B"].countered_by.contains("A"));
        assert!(map["B"].counters.contains("C"));
    }

    #[test]
    fn no_transitive_inference() {
        let mut map = heroes(&["A", "B", "C"]);
        map.get_mut("A").unwrap().counters.insert(name("B"));
        map.get_mut("B").unwrap().counters.insert(name("C"));

        reconcile(&mut map);

        assert!(!map["A"].counters.contains("C"));
        assert!(!map["C"].countered_by.contains("A"));
    }

    #[test]
    fn second_pass_is_clean() {
        let mut map = heroes(&["A", "B", "C"]);
        map.get_mut("A").unwrap().counters.extend([name("B"), name("Z"), name("A")]);
        map.get_mut("C").unwrap().countered_by.insert(name("A"));

        assert!(!reconcile(&mut map).is_clean());
        let snapshot = map.clone();
        assert!(reconcile(&mut map).is_clean());
        assert_eq!(map, snapshot);
    }

    #[test]
    fn normalizes_records() {
        let mut map = heroes(&["A"]);
        {
            let a = map.get_mut("A").unwrap();
            a.lane_tiers.clear();
            a.main_lane = Some(Lane::Mid);
        }

        reconcile(&mut map);

        assert_eq!(map["A"].lane_tiers.len(), Lane::ALL.len());
        assert_eq!(map["A"].main_lane, None);
    }

    #[test]
    fn audit_does_not_mutate() {
        let mut map = heroes(&["A", "B"]);
        map.get_mut("A").unwrap().counters.insert(name("B"));
        let before = map.clone();

        assert_eq!(audit(&map).changes(), 1);
        assert_eq!(map, before);
    }

    #[test]
    fn report_display() {
        let report = ReconcileReport {
            dangling_dropped: 1,
            self_refs_dropped: 0,
            mirrors_added: 2,
        };
        assert!(report.to_string().starts_with("3 relationships repaired"));
    }
}
