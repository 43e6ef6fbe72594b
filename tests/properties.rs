//! Property tests: random mutation sequences against the ledger invariants

use harbor_ledger::core::types::{BuildingCount, GroupIndex};
use harbor_ledger::economy::{compute_city_balance, Good, RecipeCatalog};
use harbor_ledger::ledger::Ledger;
use proptest::prelude::*;

const CITIES: [&str; 4] = ["Havana", "Nassau", "Tortuga", "Port Royal"];

#[derive(Debug, Clone)]
enum Op {
    Set(usize, usize, BuildingCount),
    Unset(usize, usize),
    RemoveCity(usize),
    Associate(GroupIndex, Vec<usize>),
    Unassociate(GroupIndex, Vec<usize>),
    RemoveGroup(GroupIndex),
}

fn op() -> impl Strategy<Value = Op> {
    let city = 0..CITIES.len();
    // A few goods keep unset hits frequent
    let good = 0..4usize;
    let group = -1..3 as GroupIndex;
    let members = prop::collection::vec(0..CITIES.len(), 1..4);
    prop_oneof![
        3 => (city.clone(), good.clone(), 1..5 as BuildingCount).prop_map(|(c, g, n)| Op::Set(c, g, n)),
        2 => (city.clone(), good).prop_map(|(c, g)| Op::Unset(c, g)),
        1 => city.prop_map(Op::RemoveCity),
        2 => (group.clone(), members.clone()).prop_map(|(g, m)| Op::Associate(g, m)),
        2 => (group.clone(), members).prop_map(|(g, m)| Op::Unassociate(g, m)),
        1 => group.prop_map(Op::RemoveGroup),
    ]
}

fn names(indices: &[usize]) -> Vec<&'static str> {
    indices.iter().map(|&i| CITIES[i]).collect()
}

/// Apply an operation; returns false when it failed with a not-found error
fn apply(ledger: &mut Ledger, op: &Op) -> bool {
    match op {
        Op::Set(c, g, n) => ledger.set_building(CITIES[*c], Good::ALL[*g], *n).is_ok(),
        Op::Unset(c, g) => ledger.unset_building(CITIES[*c], Good::ALL[*g]).is_ok(),
        Op::RemoveCity(c) => ledger.remove_city(CITIES[*c]).is_ok(),
        Op::Associate(g, m) => {
            ledger.associate_cities(*g, &names(m));
            true
        }
        Op::Unassociate(g, m) => ledger.unassociate_cities(*g, &names(m)).is_ok(),
        Op::RemoveGroup(g) => ledger.remove_group(*g).is_ok(),
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_mutation(ops in prop::collection::vec(op(), 0..40)) {
        let mut ledger = Ledger::new();
        for op in &ops {
            let before = ledger.clone();
            let applied = apply(&mut ledger, op);

            prop_assert!(ledger.invariants_hold());
            for group in ledger.groups().values() {
                for member in group.cities() {
                    prop_assert!(ledger.city(member).is_some(), "dangling member {}", member);
                }
            }
            if !applied {
                prop_assert_eq!(&ledger, &before);
            }
        }
    }

    #[test]
    fn json_round_trip_of_reachable_states(ops in prop::collection::vec(op(), 0..40)) {
        let mut ledger = Ledger::new();
        for op in &ops {
            apply(&mut ledger, op);
        }
        let json = ledger.to_json().unwrap();
        prop_assert_eq!(Ledger::from_json(&json).unwrap(), ledger);
    }

    #[test]
    fn production_is_linear_in_buildings(good in 0..Good::ALL.len(), count in 1..1000 as BuildingCount) {
        let recipes = RecipeCatalog::with_defaults();
        let good = Good::ALL[good];
        let recipe = recipes.recipe_of(good).unwrap();

        let mut ledger = Ledger::new();
        ledger.set_building("Havana", good, count).unwrap();
        let balance = compute_city_balance(ledger.city("Havana").unwrap().buildings(), &recipes);

        prop_assert_eq!(balance.produced(good), u64::from(count) * recipe.yield_per_building);
        for &(input, amount) in &recipe.inputs {
            prop_assert_eq!(balance.consumed(input), u64::from(count) * amount);
        }
    }
}
