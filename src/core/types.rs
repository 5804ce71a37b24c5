//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`HeroName`] - Validated hero name (primary key of a hero record)
//! - [`CompositionName`] - Validated team composition name
//! - [`Tier`] - Strength ranking label (`T0` strongest .. `T4`)
//! - [`Lane`] - Positional lane from the fixed five-lane vocabulary
//! - [`Role`] - Hero class from the fixed role vocabulary
//! - [`UtcTimestamp`] - RFC3339 timestamp
//! - [`Fingerprint`] - Snapshot content hash for change detection
//!
//! # Validation
//!
//! Names enforce validity at construction time. Vocabulary types parse
//! from their canonical label (the label stored in data files) or from an
//! ASCII alias, case-insensitively.
//!
//! # Examples
//!
//! ```
//! use herodex::core::types::{HeroName, Lane, Tier};
//!
//! let name = HeroName::new("  Violet ").unwrap();
//! assert_eq!(name.as_str(), "Violet");
//! assert!(HeroName::new("   ").is_err());
//!
//! assert_eq!(Tier::parse("t1"), Some(Tier::T1));
//! assert_eq!(Lane::parse("mid"), Some(Lane::Mid));
//! assert_eq!(Lane::parse("中路"), Some(Lane::Mid));
//! ```

use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::str::FromStr;
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hero name: {0}")]
    InvalidHeroName(String),

    #[error("invalid composition name: {0}")]
    InvalidCompositionName(String),

    #[error("unknown tier '{0}', expected one of: T0, T1, T2, T3, T4")]
    UnknownTier(String),

    #[error("unknown lane '{0}'")]
    UnknownLane(String),

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Prefix of bookkeeping keys in legacy data files. Hero names may not
/// start with it.
pub const RESERVED_PREFIX: &str = "__";

/// Shared rules for hero and composition names.
///
/// Surrounding whitespace is trimmed. The result must be non-empty and
/// free of control characters. Case is preserved and significant.
fn clean_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("name cannot be empty".into());
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err("name cannot contain control characters".into());
    }
    Ok(trimmed.to_string())
}

/// A validated hero name.
///
/// Hero names are the primary key of the dataset. They are compared
/// exactly (case-sensitive) after trimming surrounding whitespace.
///
/// # Example
///
/// ```
/// use herodex::core::types::HeroName;
///
/// let name = HeroName::new("Murad").unwrap();
/// assert_eq!(name.as_str(), "Murad");
/// assert_ne!(name, HeroName::new("murad").unwrap());
///
/// assert!(HeroName::new("").is_err());
/// assert!(HeroName::new("bad\nname").is_err());
/// assert!(HeroName::new("__global_bans__").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HeroName(String);

impl HeroName {
    /// Create a new validated hero name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidHeroName` if the trimmed name is empty,
    /// contains control characters, or starts with [`RESERVED_PREFIX`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, TypeError> {
        let name = clean_name(name.as_ref()).map_err(TypeError::InvalidHeroName)?;
        if name.starts_with(RESERVED_PREFIX) {
            return Err(TypeError::InvalidHeroName(format!(
                "names starting with '{}' are reserved",
                RESERVED_PREFIX
            )));
        }
        Ok(Self(name))
    }

    /// Get the hero name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HeroName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<HeroName> for String {
    fn from(name: HeroName) -> Self {
        name.0
    }
}

impl AsRef<str> for HeroName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for HeroName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HeroName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated team composition name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompositionName(String);

impl CompositionName {
    /// Create a new validated composition name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCompositionName` under the same rules as
    /// [`HeroName::new`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, TypeError> {
        clean_name(name.as_ref())
            .map(Self)
            .map_err(TypeError::InvalidCompositionName)
    }

    /// Get the composition name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CompositionName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CompositionName> for String {
    fn from(name: CompositionName) -> Self {
        name.0
    }
}

impl std::borrow::Borrow<str> for CompositionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompositionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strength ranking label, ordered strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    T0,
    T1,
    T2,
    T3,
    T4,
}

impl Tier {
    /// Every tier, strongest first.
    pub const ALL: [Tier; 5] = [Tier::T0, Tier::T1, Tier::T2, Tier::T3, Tier::T4];

    /// The label stored in data files.
    pub fn label(self) -> &'static str {
        match self {
            Tier::T0 => "T0",
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
            Tier::T4 => "T4",
        }
    }

    /// Parse a tier label, case-insensitively. Returns `None` for anything
    /// outside the vocabulary, including the empty label.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(label))
    }
}

impl FromStr for Tier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TypeError::UnknownTier(s.to_string()))
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Lane (route) from the fixed five-lane vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lane {
    /// 凱撒路
    DarkSlayer,
    /// 魔龍路
    AbyssalDragon,
    /// 中路
    Mid,
    /// 打野
    Jungle,
    /// 輔助
    Roam,
}

impl Lane {
    /// Every lane in display order.
    pub const ALL: [Lane; 5] = [
        Lane::DarkSlayer,
        Lane::AbyssalDragon,
        Lane::Mid,
        Lane::Jungle,
        Lane::Roam,
    ];

    /// The label stored in data files.
    pub fn label(self) -> &'static str {
        match self {
            Lane::DarkSlayer => "凱撒路",
            Lane::AbyssalDragon => "魔龍路",
            Lane::Mid => "中路",
            Lane::Jungle => "打野",
            Lane::Roam => "輔助",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Lane::DarkSlayer => &["slayer", "dark-slayer", "dsl"],
            Lane::AbyssalDragon => &["dragon", "abyssal-dragon", "adl"],
            Lane::Mid => &["mid"],
            Lane::Jungle => &["jungle", "jg"],
            Lane::Roam => &["roam", "support", "sup"],
        }
    }

    /// Parse a lane from its label or an ASCII alias.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|lane| {
            lane.label() == label
                || lane
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(label))
        })
    }
}

impl FromStr for Lane {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TypeError::UnknownLane(s.to_string()))
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Lane {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Hero class from the fixed role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// 凱撒
    Slayer,
    /// 射手
    Marksman,
    /// 法師
    Mage,
    /// 刺客
    Assassin,
    /// 戰士
    Warrior,
    /// 輔助
    Support,
    /// 坦克
    Tank,
}

impl Role {
    /// Every role in display order.
    pub const ALL: [Role; 7] = [
        Role::Slayer,
        Role::Marksman,
        Role::Mage,
        Role::Assassin,
        Role::Warrior,
        Role::Support,
        Role::Tank,
    ];

    /// The label stored in data files.
    pub fn label(self) -> &'static str {
        match self {
            Role::Slayer => "凱撒",
            Role::Marksman => "射手",
            Role::Mage => "法師",
            Role::Assassin => "刺客",
            Role::Warrior => "戰士",
            Role::Support => "輔助",
            Role::Tank => "坦克",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            Role::Slayer => "slayer",
            Role::Marksman => "marksman",
            Role::Mage => "mage",
            Role::Assassin => "assassin",
            Role::Warrior => "warrior",
            Role::Support => "support",
            Role::Tank => "tank",
        }
    }

    /// Parse a role from its label or ASCII alias.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.label() == label || role.alias().eq_ignore_ascii_case(label))
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TypeError::UnknownRole(s.to_string()))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A UTC timestamp that serializes as RFC3339.
///
/// # Example
///
/// ```
/// use herodex::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Saved at: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// SHA-256 fingerprint of a persisted snapshot.
///
/// Used to detect that the data file changed between read and write.
///
/// # Example
///
/// ```
/// use herodex::core::types::Fingerprint;
///
/// let a = Fingerprint::of_bytes(b"{}");
/// assert_eq!(a, Fingerprint::of_bytes(b"{}"));
/// assert_ne!(a, Fingerprint::of_bytes(b"[]"));
/// assert_eq!(a.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint of raw file contents.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hero_name {
        use super::*;

        #[test]
        fn valid_hero_names() {
            assert!(HeroName::new("Murad").is_ok());
            assert!(HeroName::new("蘇").is_ok());
            assert!(HeroName::new("Zill the Wind").is_ok());
            assert!(HeroName::new("D'Arcy").is_ok());
        }

        #[test]
        fn surrounding_whitespace_trimmed() {
            let name = HeroName::new("  Krixi\t").unwrap();
            assert_eq!(name.as_str(), "Krixi");
        }

        #[test]
        fn empty_and_blank_rejected() {
            assert!(HeroName::new("").is_err());
            assert!(HeroName::new("   ").is_err());
        }

        #[test]
        fn control_characters_rejected() {
            assert!(HeroName::new("a\u{0}b").is_err());
            assert!(HeroName::new("a\nb").is_err());
        }

        #[test]
        fn case_sensitive() {
            assert_ne!(HeroName::new("Lu Bu").unwrap(), HeroName::new("lu bu").unwrap());
        }

        #[test]
        fn reserved_prefix_rejected() {
            assert!(HeroName::new("__Zed").is_err());
            assert!(HeroName::new("  __lane_bans__").is_err());
            assert!(HeroName::new("_Zed").is_ok());
            assert!(HeroName::new("Zed__").is_ok());
        }

        #[test]
        fn serde_rejects_empty() {
            let result: Result<HeroName, _> = serde_json::from_str("\"\"");
            assert!(result.is_err());
        }

        #[test]
        fn serde_serializes_as_string() {
            let name = HeroName::new("Valhein").unwrap();
            assert_eq!(serde_json::to_string(&name).unwrap(), "\"Valhein\"");
        }
    }

    mod composition_name {
        use super::*;

        #[test]
        fn blank_rejected() {
            let err = CompositionName::new(" ").unwrap_err();
            assert!(matches!(err, TypeError::InvalidCompositionName(_)));
        }

        #[test]
        fn trimmed() {
            assert_eq!(CompositionName::new(" dive ").unwrap().as_str(), "dive");
        }
    }

    mod vocabulary {
        use super::*;

        #[test]
        fn tiers_ordered_strongest_first() {
            assert!(Tier::T0 < Tier::T1);
            assert!(Tier::T3 < Tier::T4);
        }

        #[test]
        fn tier_parse_is_case_insensitive() {
            assert_eq!(Tier::parse("T2"), Some(Tier::T2));
            assert_eq!(Tier::parse(" t4 "), Some(Tier::T4));
            assert_eq!(Tier::parse(""), None);
            assert_eq!(Tier::parse("S"), None);
        }

        #[test]
        fn tier_from_str_reports_unknown() {
            let err = "T9".parse::<Tier>().unwrap_err();
            assert_eq!(err, TypeError::UnknownTier("T9".into()));
        }

        #[test]
        fn lanes_parse_label_and_alias() {
            for lane in Lane::ALL {
                assert_eq!(Lane::parse(lane.label()), Some(lane));
            }
            assert_eq!(Lane::parse("JUNGLE"), Some(Lane::Jungle));
            assert_eq!(Lane::parse("dsl"), Some(Lane::DarkSlayer));
            assert_eq!(Lane::parse("top"), None);
        }

        #[test]
        fn roles_parse_label_and_alias() {
            for role in Role::ALL {
                assert_eq!(Role::parse(role.label()), Some(role));
            }
            assert_eq!(Role::parse("Tank"), Some(Role::Tank));
            assert_eq!(Role::parse("healer"), None);
        }

        #[test]
        fn vocabulary_serializes_as_label() {
            assert_eq!(serde_json::to_string(&Tier::T1).unwrap(), "\"T1\"");
            assert_eq!(serde_json::to_string(&Lane::Mid).unwrap(), "\"中路\"");
            assert_eq!(serde_json::to_string(&Role::Mage).unwrap(), "\"法師\"");
        }
    }

    mod fingerprint {
        use super::*;

        #[test]
        fn deterministic() {
            let bytes = br#"{"heroes":{}}"#;
            assert_eq!(Fingerprint::of_bytes(bytes), Fingerprint::of_bytes(bytes));
        }

        #[test]
        fn differs_on_content() {
            assert_ne!(
                Fingerprint::of_bytes(b"one"),
                Fingerprint::of_bytes(b"two")
            );
        }
    }
}
