//! City record - production buildings per good

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::BuildingCount;
use crate::economy::good::Good;

/// Production buildings owned by one city
///
/// A zero count means "no building" and is never kept once the ledger has
/// normalised the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    buildings: BTreeMap<Good, BuildingCount>,
}

impl City {
    pub fn new() -> Self {
        Self::default()
    }

    /// Building counts, ordered by good
    pub fn buildings(&self) -> &BTreeMap<Good, BuildingCount> {
        &self.buildings
    }

    /// Number of buildings for a good (0 when there are none)
    pub fn count(&self, good: Good) -> BuildingCount {
        self.buildings.get(&good).copied().unwrap_or(0)
    }

    pub fn has_building(&self, good: Good) -> bool {
        self.buildings.contains_key(&good)
    }

    /// Overwrite the count for a good, returning the previous count
    pub fn set(&mut self, good: Good, count: BuildingCount) -> Option<BuildingCount> {
        self.buildings.insert(good, count)
    }

    /// Remove the buildings of a good, returning the removed count
    pub fn remove(&mut self, good: Good) -> Option<BuildingCount> {
        self.buildings.remove(&good)
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Drop zero-count entries, returning the goods that were dropped
    pub fn prune_zero_counts(&mut self) -> Vec<Good> {
        let zeroed: Vec<Good> = self
            .buildings
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(good, _)| *good)
            .collect();
        for good in &zeroed {
            self.buildings.remove(good);
        }
        zeroed
    }
}

impl FromIterator<(Good, BuildingCount)> for City {
    fn from_iter<I: IntoIterator<Item = (Good, BuildingCount)>>(iter: I) -> Self {
        Self {
            buildings: iter.into_iter().collect(),
        }
    }
}
