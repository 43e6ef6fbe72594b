//! Economy layer - goods, recipes, and production balances

pub mod balance;
pub mod city;
pub mod good;
pub mod group;
pub mod recipe;

pub use balance::{
    compute_city_balance, compute_group_balance, to_net, CityBalance, GoodAmounts, GroupBalance,
};
pub use city::City;
pub use good::{Good, UnknownGood};
pub use group::Group;
pub use recipe::{default_recipe, Recipe, RecipeCatalog, RecipeLoadError, MAX_RECIPE_AMOUNT};
