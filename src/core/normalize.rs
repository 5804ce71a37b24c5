//! core::normalize
//!
//! Total conversion of raw JSON into the canonical model.
//!
//! # Leniency
//!
//! Data files are hand-edited and have gone through several layouts, so
//! nothing in this module fails. Missing or wrongly typed fields become
//! their zero value, unknown vocabulary is dropped, and names that fail
//! validation are skipped.
//!
//! Accepted legacy shapes:
//!
//! - snake_case and camelCase field names (`countered_by` / `counteredBy`)
//! - name lists given as one whitespace-separated string
//! - a composition given as a bare list of member names
//! - a hero without `lane_tiers`, or without `main_lane`
//! - the single-file app layout (`bans.total`, `bans.lanes`, `team_comps`)
//! - the reserved-prefix layout, where `__global_bans__`, `__lane_bans__`
//!   and `__compositions__` sit next to hero names in one map
//!
//! # Example
//!
//! ```
//! use herodex::core::normalize::normalize_composition;
//! use serde_json::json;
//!
//! let comp = normalize_composition(&json!(["A", "B"]));
//! assert_eq!(comp.members.len(), 2);
//! assert!(comp.core.is_none());
//! assert!(comp.counters.is_empty());
//! ```

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use super::model::{BanState, CompositionRecord, Dataset, HeroRecord, RelationField};
use super::types::{CompositionName, HeroName, Lane, Role, Tier, RESERVED_PREFIX};

/// Reserved key holding the global ban list.
pub const RESERVED_GLOBAL_BANS: &str = "__global_bans__";
/// Reserved key holding per-lane ban lists.
pub const RESERVED_LANE_BANS: &str = "__lane_bans__";
/// Reserved key holding compositions.
pub const RESERVED_COMPOSITIONS: &str = "__compositions__";

/// Look up the first present key among aliases.
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

/// Flatten a string-or-list value into its non-empty string items.
///
/// A single string is split on whitespace. Numbers inside lists are kept
/// as their decimal text; anything else is dropped.
fn string_items(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => s.split_whitespace().map(str::to_string).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Normalize a list of hero names.
///
/// Invalid names are skipped and duplicates collapse.
pub fn normalize_names(raw: &Value) -> BTreeSet<HeroName> {
    names_from(Some(raw))
}

fn names_from(value: Option<&Value>) -> BTreeSet<HeroName> {
    string_items(value)
        .into_iter()
        .filter_map(|s| HeroName::new(s).ok())
        .collect()
}

fn tier_from(value: Option<&Value>) -> Option<Tier> {
    match value {
        Some(Value::String(s)) => Tier::parse(s),
        _ => None,
    }
}

/// Normalize one raw hero record.
///
/// Never fails. A non-object input yields an empty record.
///
/// # Example
///
/// ```
/// use herodex::core::normalize::normalize_hero;
/// use herodex::core::types::Lane;
/// use serde_json::json;
///
/// let hero = normalize_hero(&json!({
///     "tier": "T1",
///     "lanes": ["中路", "打野"],
///     "counteredBy": "Butterfly Zill",
/// }));
/// assert_eq!(hero.main_lane, Some(Lane::Mid));
/// assert_eq!(hero.countered_by.len(), 2);
/// ```
pub fn normalize_hero(raw: &Value) -> HeroRecord {
    let Some(obj) = raw.as_object() else {
        return HeroRecord::default();
    };

    let lanes: Vec<Lane> = string_items(field(obj, &["lanes"]))
        .iter()
        .filter_map(|s| Lane::parse(s))
        .collect();

    let mut record = HeroRecord {
        tier: tier_from(field(obj, &["tier"])),
        roles: string_items(field(obj, &["roles"]))
            .iter()
            .filter_map(|s| Role::parse(s))
            .collect::<BTreeSet<_>>(),
        lanes,
        // Empty or foreign values are replaced by `HeroRecord::normalize`.
        main_lane: match field(obj, &["main_lane", "mainLane"]) {
            Some(Value::String(s)) => Lane::parse(s),
            _ => None,
        },
        lane_tiers: BTreeMap::new(),
        counters: names_from(field(obj, &[RelationField::Counters.key()])),
        countered_by: names_from(field(obj, &[RelationField::CounteredBy.key(), "counteredBy"])),
        synergy: names_from(field(obj, &[RelationField::Synergy.key()])),
        ban_targets: names_from(field(obj, &[RelationField::BanTargets.key(), "banTargets"])),
        image: text(field(obj, &["image"])),
        notes: text(field(obj, &["notes"])),
    };

    if let Some(Value::Object(tiers)) = field(obj, &["lane_tiers", "laneTiers"]) {
        for (label, tier) in tiers {
            if let Some(lane) = Lane::parse(label) {
                record.lane_tiers.insert(lane, tier_from(Some(tier)));
            }
        }
    }

    record.normalize();
    record
}

/// Normalize one raw composition.
///
/// Accepts a bare list (or whitespace-separated string) of member names,
/// or an object with `members`, `core` and `counters`. The original app
/// stored the weak-against list as `countered_by`; it is read as
/// `counters`.
pub fn normalize_composition(raw: &Value) -> CompositionRecord {
    match raw {
        Value::Array(_) | Value::String(_) => CompositionRecord {
            members: normalize_names(raw),
            ..CompositionRecord::default()
        },
        Value::Object(obj) => CompositionRecord {
            members: names_from(field(obj, &["members"])),
            core: match field(obj, &["core"]) {
                Some(Value::String(s)) => HeroName::new(s).ok(),
                _ => None,
            },
            counters: names_from(field(obj, &["counters", "countered_by", "counteredBy"])),
        },
        _ => CompositionRecord::default(),
    }
}

/// Normalize lane-keyed ban lists. Every lane is present in the result.
pub fn normalize_lane_bans(raw: Option<&Value>) -> BTreeMap<Lane, BTreeSet<HeroName>> {
    let mut lanes = BanState::default().lanes;
    if let Some(Value::Object(obj)) = raw {
        for (label, names) in obj {
            if let Some(lane) = Lane::parse(label) {
                lanes.insert(lane, names_from(Some(names)));
            }
        }
    }
    lanes
}

/// Normalize a compositions collection.
///
/// Accepts a map of name to composition, or the list form used by the
/// original app where each entry carries its own `name`.
fn normalize_compositions(raw: Option<&Value>) -> BTreeMap<CompositionName, CompositionRecord> {
    let mut out = BTreeMap::new();
    match raw {
        Some(Value::Object(obj)) => {
            for (name, comp) in obj {
                if let Ok(name) = CompositionName::new(name) {
                    out.insert(name, normalize_composition(comp));
                }
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                let name = item
                    .get("name")
                    .and_then(Value::as_str)
                    .and_then(|s| CompositionName::new(s).ok());
                if let Some(name) = name {
                    out.insert(name, normalize_composition(item));
                }
            }
        }
        _ => {}
    }
    out
}

/// Normalize a whole raw snapshot into a [`Dataset`].
///
/// Never fails. A non-object input yields an empty dataset.
///
/// # Example
///
/// ```
/// use herodex::core::normalize::normalize_dataset;
/// use serde_json::json;
///
/// // Reserved-prefix layout: bookkeeping keys beside hero names.
/// let data = normalize_dataset(&json!({
///     "Violet": { "tier": "T1" },
///     "__global_bans__": ["Violet"],
///     "__compositions__": { "poke": ["Violet"] },
/// }));
/// assert_eq!(data.heroes.len(), 1);
/// assert_eq!(data.bans.global.len(), 1);
/// assert_eq!(data.compositions.len(), 1);
/// ```
pub fn normalize_dataset(raw: &Value) -> Dataset {
    let Some(root) = raw.as_object() else {
        return Dataset::default();
    };

    match root.get("heroes") {
        Some(Value::Object(heroes)) => normalize_structured(root, heroes),
        Some(_) => normalize_structured(root, &Map::new()),
        None => {
            log::debug!("reading reserved-prefix snapshot layout");
            normalize_flat(root)
        }
    }
}

/// Canonical and original-app layouts: typed root fields.
fn normalize_structured(root: &Map<String, Value>, heroes: &Map<String, Value>) -> Dataset {
    // Reserved-prefix keys may also show up inside the hero map of files
    // that were migrated by hand.
    let mut data = normalize_flat(heroes);

    let legacy_bans = root.get("bans").and_then(Value::as_object);

    if let Some(global) = field(root, &["global_bans", "globalBans"])
        .or_else(|| legacy_bans.and_then(|b| field(b, &["total", "global"])))
    {
        data.bans.global = names_from(Some(global));
    }

    if let Some(lanes) =
        field(root, &["lane_bans", "laneBans"]).or_else(|| legacy_bans.and_then(|b| b.get("lanes")))
    {
        data.bans.lanes = normalize_lane_bans(Some(lanes));
    }

    if let Some(comps) = field(root, &["compositions", "team_comps", "teamComps"]) {
        data.compositions.extend(normalize_compositions(Some(comps)));
    }

    data
}

/// Reserved-prefix layout: one map of hero names plus bookkeeping keys.
fn normalize_flat(map: &Map<String, Value>) -> Dataset {
    let mut data = Dataset::default();

    for (key, value) in map {
        match key.as_str() {
            RESERVED_GLOBAL_BANS => data.bans.global = names_from(Some(value)),
            RESERVED_LANE_BANS => data.bans.lanes = normalize_lane_bans(Some(value)),
            RESERVED_COMPOSITIONS => data.compositions = normalize_compositions(Some(value)),
            k if k.starts_with(RESERVED_PREFIX) => {}
            k => {
                if let Ok(name) = HeroName::new(k) {
                    data.heroes.insert(name, normalize_hero(value));
                }
            }
        }
    }

    data
}
