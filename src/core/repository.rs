//! core::repository
//!
//! In-memory dataset with invariant-preserving CRUD and whole-snapshot
//! load/persist.
//!
//! # Architecture
//!
//! The repository owns one [`Dataset`] and one [`SnapshotStore`]. It is
//! constructed once by the entry point and passed to whoever edits; there
//! is no global "current dataset".
//!
//! Mutations never reconcile on their own. Callers batch upserts and
//! deletes, then call [`Repository::reconcile`] once, then
//! [`Repository::persist_all`]:
//!
//! ```
//! use herodex::core::model::HeroRecord;
//! use herodex::core::repository::Repository;
//! use herodex::core::types::HeroName;
//! use herodex::store::MemoryStore;
//!
//! let mut repo = Repository::new(MemoryStore::new());
//! repo.load_all().unwrap();
//!
//! let mut a = HeroRecord::new();
//! a.counters.insert(HeroName::new("B").unwrap());
//! repo.upsert_hero("A", a).unwrap();
//! repo.upsert_hero("B", HeroRecord::new()).unwrap();
//!
//! assert_eq!(repo.reconcile().changes(), 1);
//! repo.persist_all().unwrap();
//! ```
//!
//! # States
//!
//! A repository is either not yet loaded or loaded. Persisting before a
//! load (or import) is refused so an empty in-memory state never
//! overwrites a snapshot it has not seen.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::model::{BanState, CompositionRecord, Dataset, HeroRecord, RelationField};
use super::normalize::{normalize_composition, normalize_hero};
use super::reconcile::{reconcile, ReconcileReport};
use super::snapshot::{self, SnapshotError};
use super::types::{CompositionName, HeroName, Lane, TypeError};
use crate::store::{SnapshotStore, StoreError};

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A key failed validation; nothing was changed.
    #[error(transparent)]
    Validation(#[from] TypeError),

    /// `persist_all` before `load_all`.
    #[error("dataset has not been loaded")]
    NotLoaded,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Dataset plus the store it came from.
#[derive(Debug)]
pub struct Repository<S: SnapshotStore> {
    store: S,
    data: Dataset,
    loaded: bool,
}

impl<S: SnapshotStore> Repository<S> {
    /// Create an empty, not-yet-loaded repository over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            data: Dataset::default(),
            loaded: false,
        }
    }

    /// Whether `load_all` or `import_value` has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // =========================================================================
    // Bulk load / persist
    // =========================================================================

    /// Replace the in-memory state with the stored snapshot.
    ///
    /// A store with nothing in it yields an empty dataset. Every record is
    /// normalized on the way in; relationships are not reconciled.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Store` if the read fails. The in-memory state is
    /// left unchanged in that case.
    pub fn load_all(&mut self) -> Result<(), RepoError> {
        let raw = self.store.read_all()?;
        self.data = match raw {
            Some(value) => snapshot::decode(&value),
            None => Dataset::default(),
        };
        self.loaded = true;
        log::info!(
            "loaded {} heroes, {} compositions from {}",
            self.data.heroes.len(),
            self.data.compositions.len(),
            self.store.location()
        );
        Ok(())
    }

    /// Write the whole in-memory state to the store.
    ///
    /// # Errors
    ///
    /// - `RepoError::NotLoaded` if nothing was loaded or imported yet
    /// - `RepoError::Store` if the write fails; the previous snapshot stays
    pub fn persist_all(&mut self) -> Result<(), RepoError> {
        if !self.loaded {
            return Err(RepoError::NotLoaded);
        }
        let value = snapshot::encode(&self.data)?;
        self.store.write_all(&value)?;
        log::info!(
            "persisted {} heroes to {}",
            self.data.heroes.len(),
            self.store.location()
        );
        Ok(())
    }

    /// Replace everything with a raw structure, then reconcile.
    ///
    /// Accepts every layout [`snapshot::decode`] does. Marks the repository
    /// loaded. The caller persists.
    pub fn import_value(&mut self, raw: &Value) -> ReconcileReport {
        self.data = snapshot::decode(raw);
        self.loaded = true;
        let report = self.reconcile();
        log::info!(
            "imported {} heroes, {} compositions",
            self.data.heroes.len(),
            self.data.compositions.len()
        );
        report
    }

    /// Export the current state in the canonical snapshot layout.
    pub fn export_value(&self) -> Result<Value, RepoError> {
        Ok(snapshot::encode(&self.data)?)
    }

    /// Restore relationship invariants across all heroes.
    pub fn reconcile(&mut self) -> ReconcileReport {
        reconcile(&mut self.data.heroes)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The whole dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// All heroes, sorted by name.
    pub fn heroes(&self) -> &BTreeMap<HeroName, HeroRecord> {
        &self.data.heroes
    }

    /// One hero by exact name.
    pub fn hero(&self, name: &str) -> Option<&HeroRecord> {
        self.data.heroes.get(name.trim())
    }

    /// All compositions, sorted by name.
    pub fn compositions(&self) -> &BTreeMap<CompositionName, CompositionRecord> {
        &self.data.compositions
    }

    /// One composition by exact name.
    pub fn composition(&self, name: &str) -> Option<&CompositionRecord> {
        self.data.compositions.get(name.trim())
    }

    /// Ban lists.
    pub fn bans(&self) -> &BanState {
        &self.data.bans
    }

    // =========================================================================
    // Heroes
    // =========================================================================

    /// Insert or replace a hero.
    ///
    /// Replacing unlinks counter relationships the new record no longer
    /// has: if the old record countered B and the new one does not, the
    /// hero is removed from `B.countered_by` too, and the same for
    /// `countered_by`. Otherwise the next reconcile would restore the link
    /// from B's side.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Validation` for an empty name; state is unchanged.
    pub fn upsert_hero(&mut self, name: &str, mut record: HeroRecord) -> Result<HeroName, RepoError> {
        let name = HeroName::new(name)?;
        record.normalize();
        match self.data.heroes.insert(name.clone(), record) {
            Some(previous) => {
                let unlinked = self.unlink_dropped_counters(&name, &previous);
                log::debug!("replaced hero '{}', unlinked {} mirrors", name, unlinked);
            }
            None => log::debug!("inserted hero '{}'", name),
        }
        Ok(name)
    }

    /// Insert or replace a hero from an untrusted raw record.
    pub fn upsert_hero_raw(&mut self, name: &str, raw: &Value) -> Result<HeroName, RepoError> {
        self.upsert_hero(name, normalize_hero(raw))
    }

    /// Remove `name` from the mirror field of every partner that `previous`
    /// linked to and the current record no longer does.
    fn unlink_dropped_counters(&mut self, name: &HeroName, previous: &HeroRecord) -> usize {
        let Some(current) = self.data.heroes.get(name) else {
            return 0;
        };

        let dropped: Vec<(HeroName, RelationField)> = [
            (RelationField::Counters, RelationField::CounteredBy),
            (RelationField::CounteredBy, RelationField::Counters),
        ]
        .into_iter()
        .flat_map(move |(field, mirror)| {
            previous
                .relation(field)
                .difference(current.relation(field))
                .map(move |partner| (partner.clone(), mirror))
        })
        .collect();

        let mut unlinked = 0;
        for (partner, mirror) in dropped {
            if let Some(record) = self.data.heroes.get_mut(&partner) {
                if record.relation_mut(mirror).remove(name) {
                    unlinked += 1;
                }
            }
        }
        unlinked
    }

    /// Delete a hero and cascade the removal.
    ///
    /// Strips the name from every other hero's relationship fields and from
    /// every composition's members, core and counters. Deleting an absent
    /// hero is a no-op. Returns how many references were stripped.
    pub fn delete_hero(&mut self, name: &str) -> usize {
        let Some((name, _)) = self.data.heroes.remove_entry(name.trim()) else {
            log::debug!("delete of absent hero '{}' ignored", name.trim());
            return 0;
        };

        let mut stripped = 0;
        for record in self.data.heroes.values_mut() {
            stripped += record.forget(&name);
        }
        for comp in self.data.compositions.values_mut() {
            stripped += comp.forget(&name);
        }

        log::debug!("deleted hero '{}', stripped {} references", name, stripped);
        stripped
    }

    // =========================================================================
    // Compositions
    // =========================================================================

    /// Insert or replace a composition.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Validation` for an empty name; state is unchanged.
    pub fn upsert_composition(
        &mut self,
        name: &str,
        record: CompositionRecord,
    ) -> Result<CompositionName, RepoError> {
        let name = CompositionName::new(name)?;
        self.data.compositions.insert(name.clone(), record);
        log::debug!("stored composition '{}'", name);
        Ok(name)
    }

    /// Insert or replace a composition from a raw list or object.
    pub fn upsert_composition_raw(
        &mut self,
        name: &str,
        raw: &Value,
    ) -> Result<CompositionName, RepoError> {
        self.upsert_composition(name, normalize_composition(raw))
    }

    /// Delete a composition. Deleting an absent one is a no-op.
    pub fn delete_composition(&mut self, name: &str) {
        if self.data.compositions.remove(name.trim()).is_some() {
            log::debug!("deleted composition '{}'", name.trim());
        }
    }

    // =========================================================================
    // Bans
    // =========================================================================

    /// Replace the global ban list wholesale.
    ///
    /// Blank entries are dropped and duplicates collapse.
    pub fn set_global_bans<I, T>(&mut self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.data.bans.global = collect_names(names);
    }

    /// Replace one lane's ban list wholesale.
    pub fn set_lane_bans<I, T>(&mut self, lane: Lane, names: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.data.bans.lanes.insert(lane, collect_names(names));
    }
}

fn collect_names<I, T>(names: I) -> BTreeSet<HeroName>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|n| HeroName::new(n).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn name(s: &str) -> HeroName {
        HeroName::new(s).unwrap()
    }

    fn loaded() -> Repository<MemoryStore> {
        let mut repo = Repository::new(MemoryStore::new());
        repo.load_all().unwrap();
        repo
    }

    #[test]
    fn starts_not_loaded() {
        let repo = Repository::new(MemoryStore::new());
        assert!(!repo.is_loaded());
        assert!(repo.heroes().is_empty());
    }

    #[test]
    fn persist_before_load_refused() {
        let mut repo = Repository::new(MemoryStore::new());
        assert!(matches!(repo.persist_all(), Err(RepoError::NotLoaded)));
        assert_eq!(repo.store().writes(), 0);
    }

    #[test]
    fn load_from_empty_store() {
        let repo = loaded();
        assert!(repo.is_loaded());
        assert!(repo.heroes().is_empty());
        assert_eq!(repo.bans().lanes.len(), Lane::ALL.len());
    }

    #[test]
    fn reserved_prefix_name_rejected() {
        let mut repo = loaded();
        let err = repo.upsert_hero("__Zed", HeroRecord::new()).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(repo.heroes().is_empty());
    }

    #[test]
    fn main_lane_defaulted_after_lanes_added() {
        let mut repo = loaded();
        repo.upsert_hero("A", HeroRecord::new()).unwrap();
        assert_eq!(repo.hero("A").unwrap().main_lane, None);

        let mut edited = repo.hero("A").unwrap().clone();
        edited.lanes = vec![Lane::Mid];
        repo.upsert_hero("A", edited).unwrap();
        repo.reconcile();
        repo.persist_all().unwrap();

        let stored = repo.store().snapshot().cloned().unwrap();
        let mut again = Repository::new(MemoryStore::with_snapshot(stored));
        again.load_all().unwrap();
        assert_eq!(again.hero("A").unwrap().main_lane, Some(Lane::Mid));
    }

    #[test]
    fn load_normalizes_records() {
        let store = MemoryStore::with_snapshot(json!({
            "heroes": {"A": {"lanes": ["中路"]}},
            "team_comps": [{"name": "X", "members": ["A"]}],
        }));
        let mut repo = Repository::new(store);
        repo.load_all().unwrap();

        let a = repo.hero("A").unwrap();
        assert_eq!(a.main_lane, Some(Lane::Mid));
        assert_eq!(a.lane_tiers.len(), Lane::ALL.len());
        assert!(repo.composition("X").is_some());
    }

    #[test]
    fn failed_load_leaves_state_unchanged() {
        let mut repo = loaded();
        repo.upsert_hero("A", HeroRecord::new()).unwrap();

        repo.store_mut().fail_reads(true);
        assert!(matches!(repo.load_all(), Err(RepoError::Store(_))));
        assert!(repo.hero("A").is_some());
        assert!(repo.is_loaded());
    }

    #[test]
    fn failed_persist_reports_and_keeps_previous_snapshot() {
        let mut repo = loaded();
        repo.upsert_hero("A", HeroRecord::new()).unwrap();
        repo.persist_all().unwrap();

        repo.upsert_hero("B", HeroRecord::new()).unwrap();
        repo.store_mut().fail_writes(true);
        assert!(repo.persist_all().is_err());

        let stored = repo.store().snapshot().unwrap();
        assert!(stored["heroes"].get("B").is_none());
        assert!(repo.hero("B").is_some());
    }

    #[test]
    fn upsert_rejects_empty_name() {
        let mut repo = loaded();
        let err = repo.upsert_hero("  ", HeroRecord::new()).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(repo.heroes().is_empty());
    }

    #[test]
    fn upsert_replaces_without_reconciling() {
        let mut repo = loaded();
        let mut a = HeroRecord::new();
        a.counters.insert(name("B"));
        repo.upsert_hero("A", a).unwrap();
        repo.upsert_hero("B", HeroRecord::new()).unwrap();

        assert!(repo.hero("B").unwrap().countered_by.is_empty());

        repo.upsert_hero("A", HeroRecord::new()).unwrap();
        assert!(repo.hero("A").unwrap().counters.is_empty());
        assert_eq!(repo.heroes().len(), 2);
    }

    #[test]
    fn replace_keeps_removed_counter_removed() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"counters": ["B"]})).unwrap();
        repo.upsert_hero_raw("B", &json!({})).unwrap();
        repo.reconcile();
        assert!(repo.hero("B").unwrap().countered_by.contains("A"));

        repo.upsert_hero("A", HeroRecord::new()).unwrap();
        assert!(repo.hero("B").unwrap().countered_by.is_empty());

        assert!(repo.reconcile().is_clean());
        assert!(repo.hero("A").unwrap().counters.is_empty());
    }

    #[test]
    fn replace_swaps_counter_partner() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"counters": ["B"], "countered_by": ["C"]}))
            .unwrap();
        repo.upsert_hero_raw("B", &json!({})).unwrap();
        repo.upsert_hero_raw("C", &json!({})).unwrap();
        repo.reconcile();

        let mut edited = repo.hero("A").unwrap().clone();
        edited.counters = [name("C")].into_iter().collect();
        edited.countered_by.clear();
        repo.upsert_hero("A", edited).unwrap();
        repo.reconcile();

        assert_eq!(repo.hero("A").unwrap().counters, [name("C")].into_iter().collect());
        assert!(repo.hero("A").unwrap().countered_by.is_empty());
        assert!(repo.hero("B").unwrap().countered_by.is_empty());
        assert_eq!(repo.hero("C").unwrap().countered_by, [name("A")].into_iter().collect());
        assert!(repo.hero("C").unwrap().counters.is_empty());
    }

    #[test]
    fn replace_keeps_unrelated_links() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"counters": ["B"], "synergy": ["B"]}))
            .unwrap();
        repo.upsert_hero_raw("B", &json!({"counters": ["C"]})).unwrap();
        repo.upsert_hero_raw("C", &json!({})).unwrap();
        repo.reconcile();

        let mut edited = repo.hero("A").unwrap().clone();
        edited.notes = "changed".into();
        repo.upsert_hero("A", edited).unwrap();

        assert!(repo.reconcile().is_clean());
        assert!(repo.hero("B").unwrap().countered_by.contains("A"));
        assert!(repo.hero("C").unwrap().countered_by.contains("B"));
    }

    #[test]
    fn upsert_raw_goes_through_normalizer() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"tier": "t2", "counters": "B C"}))
            .unwrap();
        let a = repo.hero("A").unwrap();
        assert_eq!(a.tier, Some(crate::core::types::Tier::T2));
        assert_eq!(a.counters.len(), 2);
    }

    #[test]
    fn reconcile_example_scenario() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"counters": ["B"]})).unwrap();
        repo.upsert_hero_raw("B", &json!({})).unwrap();

        assert_eq!(repo.reconcile().changes(), 1);
        assert_eq!(repo.hero("A").unwrap().counters, [name("B")].into_iter().collect());
        assert_eq!(repo.hero("B").unwrap().countered_by, [name("A")].into_iter().collect());
    }

    #[test]
    fn delete_hero_cascades() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"counters": ["B"], "synergy": ["B"]}))
            .unwrap();
        repo.upsert_hero_raw("B", &json!({})).unwrap();
        repo.upsert_composition_raw("X", &json!({"members": ["A", "B"], "core": "B", "counters": ["B"]}))
            .unwrap();
        repo.reconcile();

        let stripped = repo.delete_hero("B");

        assert_eq!(stripped, 5);
        assert!(repo.hero("B").is_none());
        let a = repo.hero("A").unwrap();
        assert!(a.counters.is_empty());
        assert!(a.synergy.is_empty());
        let x = repo.composition("X").unwrap();
        assert_eq!(x.members, [name("A")].into_iter().collect());
        assert_eq!(x.core, None);
        assert!(x.counters.is_empty());
        assert!(repo.reconcile().is_clean());
    }

    #[test]
    fn delete_absent_hero_is_noop() {
        let mut repo = loaded();
        repo.upsert_hero("A", HeroRecord::new()).unwrap();
        assert_eq!(repo.delete_hero("ghost"), 0);
        assert_eq!(repo.heroes().len(), 1);
    }

    #[test]
    fn composition_list_form_normalized() {
        let mut repo = loaded();
        repo.upsert_composition_raw("X", &json!(["A", "B"])).unwrap();

        let x = repo.composition("X").unwrap();
        assert_eq!(x.members, [name("A"), name("B")].into_iter().collect());
        assert_eq!(x.core, None);
        assert!(x.counters.is_empty());
    }

    #[test]
    fn composition_tolerates_dangling_members() {
        let mut repo = loaded();
        repo.upsert_composition_raw("X", &json!(["nobody"])).unwrap();
        repo.reconcile();
        assert_eq!(repo.composition("X").unwrap().members.len(), 1);
    }

    #[test]
    fn delete_composition() {
        let mut repo = loaded();
        repo.upsert_composition("X", CompositionRecord::default()).unwrap();
        repo.delete_composition("X");
        repo.delete_composition("X");
        assert!(repo.compositions().is_empty());
    }

    #[test]
    fn composition_rejects_empty_name() {
        let mut repo = loaded();
        assert!(repo.upsert_composition("", CompositionRecord::default()).is_err());
    }

    #[test]
    fn bans_replace_wholesale() {
        let mut repo = loaded();
        repo.set_global_bans(["A", "B", "A", ""]);
        assert_eq!(repo.bans().global, [name("A"), name("B")].into_iter().collect());

        repo.set_global_bans(["C"]);
        assert_eq!(repo.bans().global, [name("C")].into_iter().collect());

        repo.set_lane_bans(Lane::Jungle, vec!["D".to_string(), " ".to_string()]);
        assert_eq!(repo.bans().lane(Lane::Jungle).len(), 1);
        assert!(repo.bans().lane(Lane::Mid).is_empty());
    }

    #[test]
    fn persist_then_load_round_trip() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"tier": "T0", "lanes": ["打野"], "counters": ["B"]}))
            .unwrap();
        repo.upsert_hero_raw("B", &json!({"roles": ["坦克"]})).unwrap();
        repo.upsert_composition_raw("X", &json!(["A"])).unwrap();
        repo.set_lane_bans(Lane::Mid, ["B"]);
        repo.reconcile();
        repo.persist_all().unwrap();

        let stored = repo.store().snapshot().cloned().unwrap();
        let mut again = Repository::new(MemoryStore::with_snapshot(stored));
        again.load_all().unwrap();

        assert_eq!(again.dataset(), repo.dataset());
    }

    #[test]
    fn import_replaces_and_reconciles() {
        let mut repo = loaded();
        repo.upsert_hero("old", HeroRecord::new()).unwrap();

        let report = repo.import_value(&json!({"A": {"counters": ["B", "ghost"]}, "B": {}}));

        assert_eq!(report.changes(), 2);
        assert!(repo.hero("old").is_none());
        assert!(repo.hero("B").unwrap().countered_by.contains("A"));
    }

    #[test]
    fn import_marks_loaded() {
        let mut repo = Repository::new(MemoryStore::new());
        repo.import_value(&json!({"heroes": {}}));
        assert!(repo.is_loaded());
        repo.persist_all().unwrap();
    }

    #[test]
    fn export_round_trips_through_import() {
        let mut repo = loaded();
        repo.upsert_hero_raw("A", &json!({"counters": ["B"]})).unwrap();
        repo.upsert_hero_raw("B", &json!({})).unwrap();
        repo.reconcile();

        let exported = repo.export_value().unwrap();
        let mut other = Repository::new(MemoryStore::new());
        assert!(other.import_value(&exported).is_clean());
        assert_eq!(other.dataset(), repo.dataset());
    }
}
