//! core::snapshot
//!
//! Snapshot schema (v1): the single JSON document a dataset is persisted as.
//!
//! # Schema Design
//!
//! Snapshots are self-describing with `kind` and `schema_version`, and keep
//! bans and compositions in typed root fields rather than mixing them into
//! the hero map:
//!
//! ```json
//! {
//!   "kind": "herodex.dataset",
//!   "schema_version": 1,
//!   "saved_at": "2026-10-16T08:00:00Z",
//!   "heroes": { "Violet": { "tier": "T1", "counters": [], "...": "..." } },
//!   "global_bans": [],
//!   "lane_bans": { "中路": [] },
//!   "compositions": { "dive": { "members": [], "core": "", "counters": [] } }
//! }
//! ```
//!
//! Writing always produces this layout. Reading goes through the lenient
//! [`normalize_dataset`](crate::core::normalize::normalize_dataset), so
//! older layouts load too.
//!
//! # Example
//!
//! ```
//! use herodex::core::model::{Dataset, HeroRecord};
//! use herodex::core::snapshot::{decode, encode, DATASET_KIND};
//! use herodex::core::types::HeroName;
//!
//! let mut data = Dataset::default();
//! data.heroes.insert(HeroName::new("Violet").unwrap(), HeroRecord::new());
//!
//! let value = encode(&data).unwrap();
//! assert_eq!(value["kind"], DATASET_KIND);
//! assert_eq!(decode(&value), data);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::model::{BanState, CompositionRecord, Dataset, HeroRecord};
use super::normalize::normalize_dataset;
use super::types::{CompositionName, HeroName, UtcTimestamp};

/// The kind identifier for dataset snapshots.
pub const DATASET_KIND: &str = "herodex.dataset";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from snapshot encoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
}

/// Borrowed view serialized as the v1 document.
#[derive(Serialize)]
struct SnapshotV1<'a> {
    kind: &'static str,
    schema_version: u32,
    saved_at: UtcTimestamp,
    heroes: &'a BTreeMap<HeroName, HeroRecord>,
    global_bans: &'a BTreeSet<HeroName>,
    lane_bans: LaneBans<'a>,
    compositions: &'a BTreeMap<CompositionName, CompositionRecord>,
}

struct LaneBans<'a>(&'a BanState);

impl Serialize for LaneBans<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.lanes.iter().map(|(lane, names)| (lane.label(), names)))
    }
}

/// Encode a dataset as a v1 snapshot value.
pub fn encode(data: &Dataset) -> Result<Value, SnapshotError> {
    let doc = SnapshotV1 {
        kind: DATASET_KIND,
        schema_version: SCHEMA_VERSION,
        saved_at: UtcTimestamp::now(),
        heroes: &data.heroes,
        global_bans: &data.bans.global,
        lane_bans: LaneBans(&data.bans),
        compositions: &data.compositions,
    };
    serde_json::to_value(doc).map_err(|e| SnapshotError::Encode(e.to_string()))
}

/// Decode any supported snapshot layout into a dataset.
///
/// Never fails. A foreign `kind` or a newer `schema_version` is logged and
/// read on a best-effort basis.
pub fn decode(raw: &Value) -> Dataset {
    if let Some(kind) = raw.get("kind").and_then(Value::as_str) {
        if kind != DATASET_KIND {
            log::warn!("snapshot kind '{}' is not '{}', reading anyway", kind, DATASET_KIND);
        }
    }
    if let Some(version) = raw.get("schema_version").and_then(Value::as_u64) {
        if version > u64::from(SCHEMA_VERSION) {
            log::warn!(
                "snapshot schema version {} is newer than supported {}, reading anyway",
                version,
                SCHEMA_VERSION
            );
        }
    }
    normalize_dataset(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Lane, Tier};

    fn name(s: &str) -> HeroName {
        HeroName::new(s).unwrap()
    }

    fn sample() -> Dataset {
        let mut data = Dataset::default();
        let mut violet = HeroRecord {
            tier: Some(Tier::T1),
            lanes: vec![Lane::AbyssalDragon],
            main_lane: Some(Lane::AbyssalDragon),
            image: "violet.png".into(),
            ..HeroRecord::default()
        };
        violet.countered_by.insert(name("Zill"));
        violet.lane_tiers.insert(Lane::AbyssalDragon, Some(Tier::T0));
        data.heroes.insert(name("Violet"), violet);

        let mut zill = HeroRecord::default();
        zill.counters.insert(name("Violet"));
        data.heroes.insert(name("Zill"), zill);

        data.bans.global.insert(name("Zill"));
        data.bans.lanes.insert(Lane::Jungle, [name("Zill")].into_iter().collect());
        data.compositions.insert(
            CompositionName::new("poke").unwrap(),
            CompositionRecord {
                members: [name("Violet")].into_iter().collect(),
                core: Some(name("Violet")),
                counters: [name("Zill")].into_iter().collect(),
            },
        );
        data
    }

    #[test]
    fn encode_layout() {
        let value = encode(&sample()).unwrap();
        assert_eq!(value["kind"], DATASET_KIND);
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert!(value["saved_at"].is_string());
        assert_eq!(value["heroes"]["Violet"]["tier"], "T1");
        assert_eq!(value["heroes"]["Violet"]["main_lane"], "魔龍路");
        assert_eq!(value["heroes"]["Zill"]["counters"][0], "Violet");
        assert_eq!(value["global_bans"][0], "Zill");
        assert_eq!(value["lane_bans"]["打野"][0], "Zill");
        assert_eq!(value["compositions"]["poke"]["core"], "Violet");
    }

    #[test]
    fn encode_then_decode_is_identity() {
        let data = sample();
        let value = encode(&data).unwrap();
        assert_eq!(decode(&value), data);
    }

    #[test]
    fn encoded_text_round_trips() {
        let data = sample();
        let text = serde_json::to_string_pretty(&encode(&data).unwrap()).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decode(&parsed), data);
    }

    #[test]
    fn newer_version_still_read() {
        let mut value = encode(&sample()).unwrap();
        value["schema_version"] = Value::from(99);
        assert_eq!(decode(&value).heroes.len(), 2);
    }
}
