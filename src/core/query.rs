//! core::query
//!
//! Read-only views over the hero collection: search, gallery filtering
//! and tier rankings.

use std::collections::BTreeMap;

use super::model::HeroRecord;
use super::types::{HeroName, Lane, Role, Tier};

/// Loose form of a name for matching: whitespace removed, lowercased.
pub fn loose(s: &str) -> String {
    s.split_whitespace().collect::<String>().to_lowercase()
}

/// Heroes whose name contains `query`.
///
/// Matches either verbatim or after [`loose`] is applied to both sides.
/// An empty query matches nothing. Results are sorted by name.
///
/// # Example
///
/// ```
/// use herodex::core::model::HeroRecord;
/// use herodex::core::query::search;
/// use herodex::core::types::HeroName;
/// use std::collections::BTreeMap;
///
/// let mut heroes = BTreeMap::new();
/// heroes.insert(HeroName::new("Lu Bu").unwrap(), HeroRecord::new());
/// heroes.insert(HeroName::new("Lumburr").unwrap(), HeroRecord::new());
///
/// let hits: Vec<_> = search(&heroes, "lub").into_iter().map(|n| n.as_str()).collect();
/// assert_eq!(hits, vec!["Lu Bu"]);
/// ```
pub fn search<'a>(heroes: &'a BTreeMap<HeroName, HeroRecord>, query: &str) -> Vec<&'a HeroName> {
    let needle = loose(query);
    if query.trim().is_empty() || needle.is_empty() {
        return Vec::new();
    }

    heroes
        .keys()
        .filter(|name| name.as_str().contains(query) || loose(name.as_str()).contains(&needle))
        .collect()
}

/// Gallery filter. Every criterion that is set must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeroFilter {
    pub role: Option<Role>,
    pub lane: Option<Lane>,
    /// Compared against the global tier.
    pub tier: Option<Tier>,
}

impl HeroFilter {
    /// Whether a record passes the filter.
    pub fn matches(&self, record: &HeroRecord) -> bool {
        self.role.map_or(true, |role| record.roles.contains(&role))
            && self.lane.map_or(true, |lane| record.lanes.contains(&lane))
            && self.tier.map_or(true, |tier| record.tier == Some(tier))
    }

    /// Names of all heroes passing the filter, sorted.
    pub fn apply<'a>(&self, heroes: &'a BTreeMap<HeroName, HeroRecord>) -> Vec<&'a HeroName> {
        heroes
            .iter()
            .filter(|(_, record)| self.matches(record))
            .map(|(name, _)| name)
            .collect()
    }
}

/// One row of a tier ranking. `tier == None` is the unranked group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierGroup<'a> {
    pub tier: Option<Tier>,
    pub heroes: Vec<&'a HeroName>,
}

/// Heroes grouped by global tier, strongest first, unranked last.
///
/// Every tier appears even when empty; the unranked group only when it
/// has members.
pub fn tier_ranking(heroes: &BTreeMap<HeroName, HeroRecord>) -> Vec<TierGroup<'_>> {
    group_by_tier(heroes, |record| record.tier)
}

/// Heroes that play `lane`, grouped by their tier in that lane.
pub fn lane_tier_ranking(heroes: &BTreeMap<HeroName, HeroRecord>, lane: Lane) -> Vec<TierGroup<'_>> {
    let mut groups = tiers_then_unranked();
    for (name, record) in heroes {
        if record.lanes.contains(&lane) || record.lane_tier(lane).is_some() {
            push_into(&mut groups, record.lane_tier(lane), name);
        }
    }
    finish(groups)
}

fn group_by_tier<F>(heroes: &BTreeMap<HeroName, HeroRecord>, tier_of: F) -> Vec<TierGroup<'_>>
where
    F: Fn(&HeroRecord) -> Option<Tier>,
{
    let mut groups = tiers_then_unranked();
    for (name, record) in heroes {
        push_into(&mut groups, tier_of(record), name);
    }
    finish(groups)
}

fn tiers_then_unranked<'a>() -> Vec<TierGroup<'a>> {
    Tier::ALL
        .into_iter()
        .map(Some)
        .chain(std::iter::once(None))
        .map(|tier| TierGroup {
            tier,
            heroes: Vec::new(),
        })
        .collect()
}

fn push_into<'a>(groups: &mut [TierGroup<'a>], tier: Option<Tier>, name: &'a HeroName) {
    if let Some(group) = groups.iter_mut().find(|g| g.tier == tier) {
        group.heroes.push(name);
    }
}

fn finish(mut groups: Vec<TierGroup<'_>>) -> Vec<TierGroup<'_>> {
    groups.retain(|g| g.tier.is_some() || !g.heroes.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> HeroName {
        HeroName::new(s).unwrap()
    }

    fn sample() -> BTreeMap<HeroName, HeroRecord> {
        let mut map = BTreeMap::new();
        map.insert(
            name("Violet"),
            HeroRecord {
                tier: Some(Tier::T1),
                roles: [Role::Marksman].into_iter().collect(),
                lanes: vec![Lane::AbyssalDragon],
                ..HeroRecord::default()
            },
        );
        let mut krixi = HeroRecord {
            tier: Some(Tier::T0),
            roles: [Role::Mage].into_iter().collect(),
            lanes: vec![Lane::Mid],
            ..HeroRecord::default()
        };
        krixi.lane_tiers.insert(Lane::Mid, Some(Tier::T0));
        map.insert(name("Krixi"), krixi);
        map.insert(
            name("Thane"),
            HeroRecord {
                roles: [Role::Tank].into_iter().collect(),
                lanes: vec![Lane::Roam, Lane::DarkSlayer],
                ..HeroRecord::default()
            },
        );
        map
    }

    #[test]
    fn loose_strips_whitespace_and_case() {
        assert_eq!(loose(" Lu  Bu "), "lubu");
    }

    #[test]
    fn search_verbatim_and_loose() {
        let map = sample();
        assert_eq!(search(&map, "Vio"), vec![&name("Violet")]);
        assert_eq!(search(&map, "KRI"), vec![&name("Krixi")]);
        assert!(search(&map, "zzz").is_empty());
    }

    #[test]
    fn empty_search_matches_nothing() {
        let map = sample();
        assert!(search(&map, "").is_empty());
        assert!(search(&map, "   ").is_empty());
    }

    #[test]
    fn filter_combines_criteria() {
        let map = sample();

        let mages = HeroFilter {
            role: Some(Role::Mage),
            ..HeroFilter::default()
        };
        assert_eq!(mages.apply(&map), vec![&name("Krixi")]);

        let none = HeroFilter {
            role: Some(Role::Mage),
            lane: Some(Lane::Roam),
            ..HeroFilter::default()
        };
        assert!(none.apply(&map).is_empty());

        assert_eq!(HeroFilter::default().apply(&map).len(), 3);
    }

    #[test]
    fn filter_by_tier() {
        let map = sample();
        let t1 = HeroFilter {
            tier: Some(Tier::T1),
            ..HeroFilter::default()
        };
        assert_eq!(t1.apply(&map), vec![&name("Violet")]);
    }

    #[test]
    fn tier_ranking_orders_and_groups() {
        let map = sample();
        let ranking = tier_ranking(&map);

        assert_eq!(ranking.len(), Tier::ALL.len() + 1);
        assert_eq!(ranking[0].tier, Some(Tier::T0));
        assert_eq!(ranking[0].heroes, vec![&name("Krixi")]);
        assert_eq!(ranking[1].heroes, vec![&name("Violet")]);
        assert!(ranking[2].heroes.is_empty());
        let last = ranking.last().unwrap();
        assert_eq!(last.tier, None);
        assert_eq!(last.heroes, vec![&name("Thane")]);
    }

    #[test]
    fn tier_ranking_omits_empty_unranked() {
        let mut map = sample();
        map.remove("Thane");
        let ranking = tier_ranking(&map);
        assert_eq!(ranking.len(), Tier::ALL.len());
    }

    #[test]
    fn lane_ranking_limited_to_lane() {
        let map = sample();
        let ranking = lane_tier_ranking(&map, Lane::Mid);
        assert_eq!(ranking[0].heroes, vec![&name("Krixi")]);
        assert!(ranking.iter().all(|g| !g.heroes.contains(&&name("Violet"))));
    }
}
