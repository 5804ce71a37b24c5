//! core::model
//!
//! Canonical in-memory shape of the dataset.
//!
//! Every record held by the [`Repository`](crate::core::repository::Repository)
//! is in this shape. Raw or legacy input is converted by
//! [`normalize`](crate::core::normalize) before it gets here, so code
//! working on these types may assume fully-shaped records.
//!
//! # Invariants
//!
//! - `HeroRecord::lane_tiers` has an entry for every [`Lane`]
//! - `HeroRecord::main_lane` is a member of `lanes`, and unset only when
//!   `lanes` is empty
//! - `BanState::lanes` has an entry for every [`Lane`]
//!
//! Relationship symmetry and referential integrity across records are the
//! reconciler's job, see [`reconcile`](crate::core::reconcile).

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use super::types::{CompositionName, HeroName, Lane, Role, Tier};

/// Hero relationship fields that hold other heroes' names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationField {
    Counters,
    CounteredBy,
    Synergy,
    BanTargets,
}

impl RelationField {
    pub const ALL: [RelationField; 4] = [
        RelationField::Counters,
        RelationField::CounteredBy,
        RelationField::Synergy,
        RelationField::BanTargets,
    ];

    /// Field name as written in snapshots.
    pub fn key(self) -> &'static str {
        match self {
            RelationField::Counters => "counters",
            RelationField::CounteredBy => "countered_by",
            RelationField::Synergy => "synergy",
            RelationField::BanTargets => "ban_targets",
        }
    }
}

/// One hero's attributes and cross-references.
///
/// The hero's name is the key it is stored under, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroRecord {
    /// Global tier, unset when not ranked.
    #[serde(serialize_with = "serialize_optional_label")]
    pub tier: Option<Tier>,
    pub roles: BTreeSet<Role>,
    /// Lanes in preference order, no duplicates.
    pub lanes: Vec<Lane>,
    #[serde(serialize_with = "serialize_optional_label")]
    pub main_lane: Option<Lane>,
    /// Per-lane tier, always fully populated.
    #[serde(serialize_with = "serialize_lane_tiers")]
    pub lane_tiers: BTreeMap<Lane, Option<Tier>>,
    /// Heroes this hero is strong against.
    pub counters: BTreeSet<HeroName>,
    /// Heroes strong against this hero.
    pub countered_by: BTreeSet<HeroName>,
    pub synergy: BTreeSet<HeroName>,
    pub ban_targets: BTreeSet<HeroName>,
    /// Opaque image reference.
    pub image: String,
    pub notes: String,
}

impl Default for HeroRecord {
    fn default() -> Self {
        Self {
            tier: None,
            roles: BTreeSet::new(),
            lanes: Vec::new(),
            main_lane: None,
            lane_tiers: empty_lane_tiers(),
            counters: BTreeSet::new(),
            countered_by: BTreeSet::new(),
            synergy: BTreeSet::new(),
            ban_targets: BTreeSet::new(),
            image: String::new(),
            notes: String::new(),
        }
    }
}

impl HeroRecord {
    /// Create an empty, fully-shaped record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow one relationship field.
    pub fn relation(&self, field: RelationField) -> &BTreeSet<HeroName> {
        match field {
            RelationField::Counters => &self.counters,
            RelationField::CounteredBy => &self.countered_by,
            RelationField::Synergy => &self.synergy,
            RelationField::BanTargets => &self.ban_targets,
        }
    }

    /// Mutably borrow one relationship field.
    pub fn relation_mut(&mut self, field: RelationField) -> &mut BTreeSet<HeroName> {
        match field {
            RelationField::Counters => &mut self.counters,
            RelationField::CounteredBy => &mut self.countered_by,
            RelationField::Synergy => &mut self.synergy,
            RelationField::BanTargets => &mut self.ban_targets,
        }
    }

    /// Remove `name` from every relationship field.
    ///
    /// Returns how many entries were removed.
    pub fn forget(&mut self, name: &HeroName) -> usize {
        RelationField::ALL
            .into_iter()
            .filter(|field| self.relation_mut(*field).remove(name))
            .count()
    }

    /// Restore the per-record invariants in place.
    ///
    /// Duplicate lanes are collapsed keeping the first occurrence. A main
    /// lane that is unset or not one of `lanes` becomes the first lane.
    /// `lane_tiers` gains an empty entry for every missing lane.
    pub fn normalize(&mut self) {
        let mut seen = BTreeSet::new();
        self.lanes.retain(|lane| seen.insert(*lane));

        if !self.main_lane.is_some_and(|main| self.lanes.contains(&main)) {
            self.main_lane = self.lanes.first().copied();
        }

        for lane in Lane::ALL {
            self.lane_tiers.entry(lane).or_insert(None);
        }
    }

    /// Tier for one lane, if ranked there.
    pub fn lane_tier(&self, lane: Lane) -> Option<Tier> {
        self.lane_tiers.get(&lane).copied().flatten()
    }
}

/// A named group of heroes played together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionRecord {
    /// Member heroes. May briefly name heroes that no longer exist.
    pub members: BTreeSet<HeroName>,
    /// Designated core hero.
    #[serde(serialize_with = "serialize_optional_name")]
    pub core: Option<HeroName>,
    /// Heroes this composition is weak against. One-way; never reconciled
    /// with hero-level relationships.
    pub counters: BTreeSet<HeroName>,
}

impl CompositionRecord {
    /// Remove every reference to `name`. Returns how many were removed.
    pub fn forget(&mut self, name: &HeroName) -> usize {
        let mut removed = 0;
        if self.members.remove(name) {
            removed += 1;
        }
        if self.core.as_ref() == Some(name) {
            self.core = None;
            removed += 1;
        }
        if self.counters.remove(name) {
            removed += 1;
        }
        removed
    }
}

/// Global and per-lane ban lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanState {
    pub global: BTreeSet<HeroName>,
    /// Always has an entry for every lane.
    pub lanes: BTreeMap<Lane, BTreeSet<HeroName>>,
}

impl Default for BanState {
    fn default() -> Self {
        Self {
            global: BTreeSet::new(),
            lanes: Lane::ALL
                .into_iter()
                .map(|lane| (lane, BTreeSet::new()))
                .collect(),
        }
    }
}

impl BanState {
    /// Bans for one lane.
    pub fn lane(&self, lane: Lane) -> &BTreeSet<HeroName> {
        static EMPTY: BTreeSet<HeroName> = BTreeSet::new();
        self.lanes.get(&lane).unwrap_or(&EMPTY)
    }
}

/// The whole dataset: everything a snapshot holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub heroes: BTreeMap<HeroName, HeroRecord>,
    pub bans: BanState,
    pub compositions: BTreeMap<CompositionName, CompositionRecord>,
}

/// Lane-tier map with every lane present and unranked.
pub fn empty_lane_tiers() -> BTreeMap<Lane, Option<Tier>> {
    Lane::ALL.into_iter().map(|lane| (lane, None)).collect()
}

// Unset labels are written as "" to match hand-edited data files.

fn serialize_optional_label<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

fn serialize_optional_name<S: Serializer>(
    value: &Option<HeroName>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_ref().map(HeroName::as_str).unwrap_or(""))
}

fn serialize_lane_tiers<S: Serializer>(
    map: &BTreeMap<Lane, Option<Tier>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        map.iter()
            .map(|(lane, tier)| (lane.label(), tier.map(Tier::label).unwrap_or(""))),
    )
}
