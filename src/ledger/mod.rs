//! Ledger - the store of cities and groups
//!
//! The ledger is the only owner of economy state. It keeps two invariants
//! after every mutation:
//! - no city has an empty building map
//! - no group has an empty member set
//!
//! Cascades that restore them (a city losing its last building, a group
//! losing its last member) live in the private helpers at the bottom of
//! this file rather than at each call site.

pub mod persist;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{LedgerError, Result, Warning};
use crate::core::types::{BuildingCount, GroupIndex};
use crate::economy::balance::{compute_city_balance, compute_group_balance, CityBalance, GroupBalance};
use crate::economy::city::City;
use crate::economy::good::Good;
use crate::economy::group::Group;
use crate::economy::recipe::RecipeCatalog;

/// Result of `set_building`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    /// The city did not exist before this call
    pub city_created: bool,
    /// Count that was overwritten, if any
    pub previous: Option<BuildingCount>,
}

/// Entities removed as a side effect of a removal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    pub city_removed: bool,
    pub groups_removed: Vec<GroupIndex>,
}

/// Result of `associate_cities`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociateOutcome {
    /// Valid names now in the group, in request order
    pub added: Vec<String>,
    pub group_created: bool,
    pub warnings: Vec<Warning>,
}

/// Result of `unassociate_cities`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnassociateOutcome {
    pub removed: Vec<String>,
    pub group_removed: bool,
    pub warnings: Vec<Warning>,
}

/// Overview of every group and city
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub groups: Vec<(GroupIndex, Vec<String>)>,
    pub cities: Vec<String>,
}

/// Buildings and balance of one city
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDetail {
    pub name: String,
    pub buildings: BTreeMap<Good, BuildingCount>,
    pub balance: CityBalance,
}

/// Member details and totals of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetail {
    pub index: GroupIndex,
    /// Resolved members; dangling names are left out
    pub cities: Vec<CityDetail>,
    pub totals: GroupBalance,
}

/// What `normalize` had to discard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalization {
    pub zero_buildings: Vec<(String, Good)>,
    pub cities_removed: Vec<String>,
    pub groups_removed: Vec<GroupIndex>,
}

impl Normalization {
    pub fn is_clean(&self) -> bool {
        self.zero_buildings.is_empty()
            && self.cities_removed.is_empty()
            && self.groups_removed.is_empty()
    }
}

/// Cities keyed by name and groups keyed by index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    cities: BTreeMap<String, City>,
    groups: BTreeMap<GroupIndex, Group>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    pub fn group(&self, index: GroupIndex) -> Option<&Group> {
        self.groups.get(&index)
    }

    pub fn cities(&self) -> &BTreeMap<String, City> {
        &self.cities
    }

    pub fn groups(&self) -> &BTreeMap<GroupIndex, Group> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.groups.is_empty()
    }

    // === MUTATIONS ===

    /// Set the building count of a good in a city, creating the city if needed
    pub fn set_building(&mut self, city: &str, good: Good, count: BuildingCount) -> Result<SetOutcome> {
        if count == 0 {
            return Err(LedgerError::InvalidBuildingCount(count));
        }

        let city_created = !self.cities.contains_key(city);
        let previous = self
            .cities
            .entry(city.to_string())
            .or_default()
            .set(good, count);

        tracing::debug!("City [{}] building [{}] set to {}", city, good, count);
        self.debug_check();
        Ok(SetOutcome {
            city_created,
            previous,
        })
    }

    /// Remove the buildings of a good; a city left with none is removed
    pub fn unset_building(&mut self, city: &str, good: Good) -> Result<Cascade> {
        let record = self
            .cities
            .get_mut(city)
            .ok_or_else(|| LedgerError::CityNotFound(city.to_string()))?;
        if record.remove(good).is_none() {
            return Err(LedgerError::BuildingNotFound {
                city: city.to_string(),
                good,
            });
        }
        tracing::debug!("City [{}] building [{}] unset", city, good);

        let cascade = self.drop_city_if_empty(city);
        self.debug_check();
        Ok(cascade)
    }

    /// Remove a city and its memberships; groups left empty are removed
    pub fn remove_city(&mut self, city: &str) -> Result<Cascade> {
        if !self.cities.contains_key(city) {
            return Err(LedgerError::CityNotFound(city.to_string()));
        }
        let cascade = self.drop_city(city);
        self.debug_check();
        Ok(cascade)
    }

    /// Add existing cities to a group, creating the group on its first member
    ///
    /// Unknown names are skipped with a warning. If no name is valid, the
    /// group is neither created nor touched.
    pub fn associate_cities<S: AsRef<str>>(&mut self, index: GroupIndex, cities: &[S]) -> AssociateOutcome {
        let mut outcome = AssociateOutcome::default();
        for name in cities.iter().map(AsRef::as_ref) {
            if !self.cities.contains_key(name) {
                tracing::debug!("City [{}] not found, not added to group [{}]", name, index);
                outcome.warnings.push(Warning::UnknownCity(name.to_string()));
                continue;
            }
            if !outcome.added.iter().any(|added| added == name) {
                outcome.added.push(name.to_string());
            }
        }
        if outcome.added.is_empty() {
            return outcome;
        }

        outcome.group_created = !self.groups.contains_key(&index);
        let group = self.groups.entry(index).or_default();
        for name in &outcome.added {
            group.insert(name.clone());
        }

        tracing::debug!("Group [{}] associated with cities: {:?}", index, outcome.added);
        self.debug_check();
        outcome
    }

    /// Remove cities from a group; a group left empty is removed
    pub fn unassociate_cities<S: AsRef<str>>(
        &mut self,
        index: GroupIndex,
        cities: &[S],
    ) -> Result<UnassociateOutcome> {
        let group = self
            .groups
            .get_mut(&index)
            .ok_or(LedgerError::GroupNotFound(index))?;

        let mut outcome = UnassociateOutcome::default();
        for name in cities.iter().map(AsRef::as_ref) {
            if group.remove(name) {
                outcome.removed.push(name.to_string());
            } else {
                tracing::debug!("City [{}] not found in group [{}]", name, index);
                outcome.warnings.push(Warning::NotAMember {
                    city: name.to_string(),
                    group: index,
                });
            }
        }
        if !outcome.removed.is_empty() {
            tracing::debug!("Group [{}] unassociated with cities: {:?}", index, outcome.removed);
        }

        outcome.group_removed = !self.drop_empty_groups().is_empty();
        self.debug_check();
        Ok(outcome)
    }

    /// Remove a group; its cities are untouched
    pub fn remove_group(&mut self, index: GroupIndex) -> Result<Group> {
        let group = self
            .groups
            .remove(&index)
            .ok_or(LedgerError::GroupNotFound(index))?;
        tracing::debug!("Group [{}] removed", index);
        Ok(group)
    }

    // === QUERIES ===

    /// Every group with its members, then every city name
    pub fn list_all(&self) -> Listing {
        Listing {
            groups: self
                .groups
                .iter()
                .map(|(index, group)| (*index, group.cities().iter().cloned().collect()))
                .collect(),
            cities: self.cities.keys().cloned().collect(),
        }
    }

    /// Buildings and balance of a city
    pub fn city_detail(&self, name: &str, recipes: &RecipeCatalog) -> Result<CityDetail> {
        let city = self
            .cities
            .get(name)
            .ok_or_else(|| LedgerError::CityNotFound(name.to_string()))?;
        Ok(Self::detail_of(name, city, recipes))
    }

    /// Member details and summed balance of a group
    pub fn group_detail(&self, index: GroupIndex, recipes: &RecipeCatalog) -> Result<GroupDetail> {
        let group = self
            .groups
            .get(&index)
            .ok_or(LedgerError::GroupNotFound(index))?;

        let members: Vec<(&String, &City)> = group
            .cities()
            .iter()
            .filter_map(|name| match self.cities.get(name) {
                Some(city) => Some((name, city)),
                None => {
                    tracing::debug!("Group [{}] member [{}] has no city, skipped", index, name);
                    None
                }
            })
            .collect();

        Ok(GroupDetail {
            index,
            cities: members
                .iter()
                .map(|(name, city)| Self::detail_of(name, city, recipes))
                .collect(),
            totals: compute_group_balance(members.iter().map(|(_, city)| *city), recipes),
        })
    }

    fn detail_of(name: &str, city: &City, recipes: &RecipeCatalog) -> CityDetail {
        CityDetail {
            name: name.to_string(),
            buildings: city.buildings().clone(),
            balance: compute_city_balance(city.buildings(), recipes),
        }
    }

    // === INVARIANT MAINTENANCE ===

    /// Bring externally supplied state in line with the ledger invariants
    ///
    /// Drops zero-count buildings, then cities left without buildings, then
    /// groups left without members. Member names that match no city are kept.
    pub fn normalize(&mut self) -> Normalization {
        let mut report = Normalization::default();

        for (name, city) in self.cities.iter_mut() {
            for good in city.prune_zero_counts() {
                report.zero_buildings.push((name.clone(), good));
            }
        }

        let empty: Vec<String> = self
            .cities
            .iter()
            .filter(|(_, city)| city.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        for name in empty {
            report.groups_removed.extend(self.drop_city(&name).groups_removed);
            report.cities_removed.push(name);
        }
        report.groups_removed.extend(self.drop_empty_groups());

        self.debug_check();
        report
    }

    /// Whether both store invariants hold
    pub fn invariants_hold(&self) -> bool {
        self.cities.values().all(|city| !city.is_empty())
            && self.groups.values().all(|group| !group.is_empty())
    }

    fn debug_check(&self) {
        debug_assert!(self.invariants_hold(), "ledger invariants violated");
    }

    fn drop_city_if_empty(&mut self, city: &str) -> Cascade {
        match self.cities.get(city) {
            Some(record) if record.is_empty() => self.drop_city(city),
            _ => Cascade::default(),
        }
    }

    fn drop_city(&mut self, city: &str) -> Cascade {
        let city_removed = self.cities.remove(city).is_some();
        for group in self.groups.values_mut() {
            group.remove(city);
        }
        if city_removed {
            tracing::debug!("City [{}] removed", city);
        }
        Cascade {
            city_removed,
            groups_removed: self.drop_empty_groups(),
        }
    }

    fn drop_empty_groups(&mut self) -> Vec<GroupIndex> {
        let empty: Vec<GroupIndex> = self
            .groups
            .iter()
            .filter(|(_, group)| group.is_empty())
            .map(|(index, _)| *index)
            .collect();
        for index in &empty {
            self.groups.remove(index);
            tracing::debug!("Group [{}] removed", index);
        }
        empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(buildings: &[(&str, Good, BuildingCount)]) -> Ledger {
        let mut ledger = Ledger::new();
        for &(name, good, count) in buildings {
            ledger.set_building(name, good, count).unwrap();
        }
        ledger
    }

    #[test]
    fn test_set_building_creates_and_overwrites() {
        let mut ledger = Ledger::new();
        let first = ledger.set_building("Jamestown", Good::Wood, 2).unwrap();
        assert_eq!(
            first,
            SetOutcome {
                city_created: true,
                previous: None
            }
        );

        let second = ledger.set_building("Jamestown", Good::Wood, 5).unwrap();
        assert_eq!(
            second,
            SetOutcome {
                city_created: false,
                previous: Some(2)
            }
        );
        assert_eq!(ledger.city("Jamestown").unwrap().count(Good::Wood), 5);
    }

    #[test]
    fn test_set_building_rejects_zero() {
        let mut ledger = Ledger::new();
        let result = ledger.set_building("Jamestown", Good::Wood, 0);
        assert!(matches!(result, Err(LedgerError::InvalidBuildingCount(0))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_unset_last_building_removes_city() {
        let mut ledger = ledger_with(&[("Jamestown", Good::Wood, 2), ("Jamestown", Good::Tool, 1)]);

        let cascade = ledger.unset_building("Jamestown", Good::Wood).unwrap();
        assert_eq!(cascade, Cascade::default());
        assert!(ledger.city("Jamestown").is_some());

        let cascade = ledger.unset_building("Jamestown", Good::Tool).unwrap();
        assert!(cascade.city_removed);
        assert!(ledger.city("Jamestown").is_none());
    }

    #[test]
    fn test_unset_missing_is_not_found_without_mutation() {
        let mut ledger = ledger_with(&[("Jamestown", Good::Wood, 2)]);
        let before = ledger.clone();

        assert!(matches!(
            ledger.unset_building("Jamestown", Good::Rum),
            Err(LedgerError::BuildingNotFound { good: Good::Rum, .. })
        ));
        assert!(matches!(
            ledger.unset_building("Havana", Good::Wood),
            Err(LedgerError::CityNotFound(_))
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_unset_cascades_to_sole_member_groups() {
        let mut ledger = ledger_with(&[("A", Good::Corn, 1), ("B", Good::Meat, 1)]);
        ledger.associate_cities(1, &["A"]);
        ledger.associate_cities(2, &["A", "B"]);

        let cascade = ledger.unset_building("A", Good::Corn).unwrap();
        assert_eq!(
            cascade,
            Cascade {
                city_removed: true,
                groups_removed: vec![1]
            }
        );
        assert!(ledger.group(1).is_none());
        assert_eq!(ledger.group(2).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_city_cleans_groups() {
        let mut ledger = ledger_with(&[("A", Good::Wood, 1), ("B", Good::Wood, 1)]);
        ledger.associate_cities(1, &["A", "B"]);

        let cascade = ledger.remove_city("A").unwrap();
        assert!(cascade.groups_removed.is_empty());
        let members: Vec<_> = ledger.group(1).unwrap().cities().iter().cloned().collect();
        assert_eq!(members, vec!["B".to_string()]);

        let cascade = ledger.remove_city("B").unwrap();
        assert_eq!(cascade.groups_removed, vec![1]);
        assert!(ledger.groups().is_empty());

        assert!(matches!(ledger.remove_city("B"), Err(LedgerError::CityNotFound(_))));
    }

    #[test]
    fn test_associate_skips_unknown_cities() {
        let mut ledger = ledger_with(&[("X", Good::Hemp, 1)]);
        let outcome = ledger.associate_cities(2, &["X", "Ghost"]);

        assert_eq!(outcome.added, vec!["X".to_string()]);
        assert!(outcome.group_created);
        assert_eq!(outcome.warnings, vec![Warning::UnknownCity("Ghost".into())]);
        assert!(ledger.group(2).unwrap().contains("X"));
        assert_eq!(ledger.group(2).unwrap().len(), 1);
    }

    #[test]
    fn test_associate_with_no_valid_city_creates_nothing() {
        let mut ledger = ledger_with(&[("X", Good::Hemp, 1)]);
        let outcome = ledger.associate_cities(7, &["Ghost", "Phantom"]);
        assert!(outcome.added.is_empty());
        assert!(!outcome.group_created);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(ledger.group(7).is_none());
    }

    #[test]
    fn test_associate_into_existing_group() {
        let mut ledger = ledger_with(&[("X", Good::Hemp, 1), ("Y", Good::Rope, 1)]);
        ledger.associate_cities(3, &["X"]);
        let outcome = ledger.associate_cities(3, &["Y", "X", "Y"]);

        assert!(!outcome.group_created);
        assert_eq!(outcome.added, vec!["Y".to_string(), "X".to_string()]);
        assert_eq!(ledger.group(3).unwrap().len(), 2);
    }

    #[test]
    fn test_unassociate() {
        let mut ledger = ledger_with(&[("X", Good::Hemp, 1), ("Y", Good::Rope, 1)]);
        ledger.associate_cities(3, &["X", "Y"]);

        let outcome = ledger.unassociate_cities(3, &["X", "Nope"]).unwrap();
        assert_eq!(outcome.removed, vec!["X".to_string()]);
        assert!(!outcome.group_removed);
        assert_eq!(
            outcome.warnings,
            vec![Warning::NotAMember {
                city: "Nope".into(),
                group: 3
            }]
        );

        let outcome = ledger.unassociate_cities(3, &["Y"]).unwrap();
        assert!(outcome.group_removed);
        assert!(ledger.group(3).is_none());
        // Cities are never removed by unassociation
        assert!(ledger.city("X").is_some());
        assert!(ledger.city("Y").is_some());

        assert!(matches!(
            ledger.unassociate_cities(3, &["Y"]),
            Err(LedgerError::GroupNotFound(3))
        ));
    }

    #[test]
    fn test_remove_group_keeps_cities() {
        let mut ledger = ledger_with(&[("X", Good::Hemp, 1)]);
        ledger.associate_cities(-4, &["X"]);

        let removed = ledger.remove_group(-4).unwrap();
        assert!(removed.contains("X"));
        assert!(ledger.city("X").is_some());
        assert!(matches!(ledger.remove_group(-4), Err(LedgerError::GroupNotFound(-4))));
    }

    #[test]
    fn test_list_all_is_sorted() {
        let mut ledger = ledger_with(&[
            ("Tortuga", Good::Rum, 1),
            ("Havana", Good::Sugar, 1),
            ("Nassau", Good::Wood, 1),
        ]);
        ledger.associate_cities(9, &["Tortuga", "Havana"]);
        ledger.associate_cities(1, &["Nassau"]);

        let listing = ledger.list_all();
        assert_eq!(
            listing.groups,
            vec![
                (1, vec!["Nassau".to_string()]),
                (9, vec!["Havana".to_string(), "Tortuga".to_string()]),
            ]
        );
        assert_eq!(listing.cities, vec!["Havana", "Nassau", "Tortuga"]);
    }

    #[test]
    fn test_city_detail() {
        let recipes = RecipeCatalog::with_defaults();
        let ledger = ledger_with(&[("Jamestown", Good::Wood, 2), ("Jamestown", Good::Tool, 1)]);

        let detail = ledger.city_detail("Jamestown", &recipes).unwrap();
        assert_eq!(detail.name, "Jamestown");
        assert_eq!(detail.buildings.len(), 2);
        assert_eq!(detail.balance.net(Good::Wood), 110);

        assert!(matches!(
            ledger.city_detail("Havana", &recipes),
            Err(LedgerError::CityNotFound(_))
        ));
    }

    #[test]
    fn test_group_detail_skips_dangling_members() {
        let recipes = RecipeCatalog::with_defaults();
        let json = r#"{
            "cities": {"A": {"buildings": {"wood": 1}}},
            "groups": {"5": {"cities": ["A", "Ghost"]}}
        }"#;
        let ledger = Ledger::from_json(json).unwrap();

        let detail = ledger.group_detail(5, &recipes).unwrap();
        assert_eq!(detail.cities.len(), 1);
        assert_eq!(detail.cities[0].name, "A");
        assert_eq!(detail.totals.produced(Good::Wood), 60);

        assert!(matches!(
            ledger.group_detail(6, &recipes),
            Err(LedgerError::GroupNotFound(6))
        ));
    }

    #[test]
    fn test_normalize_prunes_invalid_state() {
        let json = r#"{
            "cities": {
                "Empty": {"buildings": {}},
                "Zeroed": {"buildings": {"wood": 0}},
                "Kept": {"buildings": {"wood": 0, "rum": 2}}
            },
            "groups": {
                "1": {"cities": ["Empty", "Zeroed"]},
                "2": {"cities": ["Kept", "Zeroed"]},
                "3": {"cities": []}
            }
        }"#;
        let mut ledger: Ledger = serde_json::from_str(json).unwrap();
        let report = ledger.normalize();

        assert_eq!(
            report.zero_buildings,
            vec![("Kept".to_string(), Good::Wood), ("Zeroed".to_string(), Good::Wood)]
        );
        assert_eq!(report.cities_removed, vec!["Empty", "Zeroed"]);
        let mut groups_removed = report.groups_removed.clone();
        groups_removed.sort_unstable();
        assert_eq!(groups_removed, vec![1, 3]);
        assert!(ledger.invariants_hold());
        assert_eq!(ledger.group(2).unwrap().len(), 1);
        assert_eq!(ledger.city("Kept").unwrap().count(Good::Rum), 2);
    }
}
