//! Balance calculation - gross production and consumption per good
//!
//! Production and consumption are accumulated separately and never netted
//! here. Listings need both gross figures as well as the net, and the net
//! is cheap to derive on demand.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;

use crate::core::types::{Amount, BuildingCount, Net};
use crate::economy::city::City;
use crate::economy::good::Good;
use crate::economy::recipe::RecipeCatalog;

/// Per-good amounts, absent keys meaning zero
pub type GoodAmounts = AHashMap<Good, Amount>;

/// Convert a gross amount to a signed figure, clamping at `Net::MAX`
pub fn to_net(amount: Amount) -> Net {
    Net::try_from(amount).unwrap_or(Net::MAX)
}

fn net_of(produces: &GoodAmounts, consumes: &GoodAmounts, good: Good) -> Net {
    let produced = to_net(produces.get(&good).copied().unwrap_or(0));
    let consumed = to_net(consumes.get(&good).copied().unwrap_or(0));
    produced - consumed
}

fn accumulate(target: &mut GoodAmounts, good: Good, amount: Amount) {
    let entry = target.entry(good).or_insert(0);
    *entry = entry.saturating_add(amount);
}

fn goods_of(produces: &GoodAmounts, consumes: &GoodAmounts) -> Vec<Good> {
    produces
        .keys()
        .chain(consumes.keys())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn add_into(target: &mut GoodAmounts, source: &GoodAmounts) {
    for (&good, &amount) in source {
        accumulate(target, good, amount);
    }
}

/// Gross figures for a single city
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityBalance {
    pub produces: GoodAmounts,
    pub consumes: GoodAmounts,
}

impl CityBalance {
    pub fn produced(&self, good: Good) -> Amount {
        self.produces.get(&good).copied().unwrap_or(0)
    }

    pub fn consumed(&self, good: Good) -> Amount {
        self.consumes.get(&good).copied().unwrap_or(0)
    }

    /// Production minus consumption
    pub fn net(&self, good: Good) -> Net {
        net_of(&self.produces, &self.consumes, good)
    }

    /// Goods that are produced or consumed, in declaration order
    pub fn goods(&self) -> Vec<Good> {
        goods_of(&self.produces, &self.consumes)
    }
}

/// Summed figures for a group of cities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBalance {
    /// Total buildings per good across member cities
    pub buildings: GoodAmounts,
    pub produces: GoodAmounts,
    pub consumes: GoodAmounts,
}

impl GroupBalance {
    pub fn buildings_of(&self, good: Good) -> Amount {
        self.buildings.get(&good).copied().unwrap_or(0)
    }

    pub fn produced(&self, good: Good) -> Amount {
        self.produces.get(&good).copied().unwrap_or(0)
    }

    pub fn consumed(&self, good: Good) -> Amount {
        self.consumes.get(&good).copied().unwrap_or(0)
    }

    pub fn net(&self, good: Good) -> Net {
        net_of(&self.produces, &self.consumes, good)
    }

    pub fn goods(&self) -> Vec<Good> {
        goods_of(&self.produces, &self.consumes)
    }
}

/// Compute what a city's buildings produce and consume in one cycle
///
/// Goods without a building, or without a registered recipe, contribute
/// nothing and leave no zero entries behind. Amounts saturate at
/// `Amount::MAX` instead of overflowing.
pub fn compute_city_balance(
    buildings: &BTreeMap<Good, BuildingCount>,
    recipes: &RecipeCatalog,
) -> CityBalance {
    let mut balance = CityBalance {
        produces: AHashMap::with_capacity(buildings.len()),
        consumes: AHashMap::new(),
    };

    for (&good, &count) in buildings {
        if count == 0 {
            continue;
        }
        let recipe = match recipes.recipe_of(good) {
            Some(r) => r,
            None => continue,
        };
        let count = Amount::from(count);

        accumulate(
            &mut balance.produces,
            good,
            count.saturating_mul(recipe.yield_per_building),
        );
        for &(input, per_building) in &recipe.inputs {
            accumulate(&mut balance.consumes, input, count.saturating_mul(per_building));
        }
    }

    balance
}

/// Sum building counts and city balances over a set of cities
pub fn compute_group_balance<'a>(
    cities: impl IntoIterator<Item = &'a City>,
    recipes: &RecipeCatalog,
) -> GroupBalance {
    let mut total = GroupBalance::default();

    for city in cities {
        for (&good, &count) in city.buildings() {
            accumulate(&mut total.buildings, good, Amount::from(count));
        }
        let balance = compute_city_balance(city.buildings(), recipes);
        add_into(&mut total.produces, &balance.produces);
        add_into(&mut total.consumes, &balance.consumes);
    }

    total
}
