//! Production recipes - what one building of each good yields and consumes
//!
//! Recipes are a single hop: a building turns its inputs directly into its
//! output, and the inputs' own recipes are never consulted.

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::types::Amount;
use crate::economy::good::Good;

/// Largest per-building yield or input a recipe file may declare
pub const MAX_RECIPE_AMOUNT: Amount = 1_000_000;

/// Yield and upkeep of a single production building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Output per building per cycle
    pub yield_per_building: Amount,
    /// Inputs consumed per building per cycle, empty for raw goods
    pub inputs: Vec<(Good, Amount)>,
}

impl Recipe {
    /// A recipe with no inputs
    pub fn raw(yield_per_building: Amount) -> Self {
        Self {
            yield_per_building,
            inputs: Vec::new(),
        }
    }

    pub fn is_raw(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// The game's fixed production table
pub fn default_recipe(good: Good) -> Recipe {
    let manufactured = |yield_per_building, inputs: &[(Good, Amount)]| Recipe {
        yield_per_building,
        inputs: inputs.to_vec(),
    };

    match good {
        Good::Wood | Good::Brick | Good::Wheat => Recipe::raw(60),
        Good::Fruit | Good::Corn | Good::Sugar | Good::Hemp | Good::Cotton => Recipe::raw(40),
        Good::Dye | Good::Tobacco => Recipe::raw(20),
        Good::Coffee | Good::Cacao => manufactured(20, &[(Good::Tool, 5)]),
        Good::Metal => manufactured(30, &[(Good::Wood, 15)]),
        Good::Bread => manufactured(20, &[(Good::Wheat, 10), (Good::Sugar, 10)]),
        Good::Meat => manufactured(10, &[(Good::Corn, 20)]),
        Good::Rum => manufactured(10, &[(Good::Wood, 5), (Good::Sugar, 10)]),
        Good::Rope => manufactured(20, &[(Good::Hemp, 20)]),
        Good::Textile => manufactured(20, &[(Good::Cotton, 20)]),
        Good::Tool => manufactured(20, &[(Good::Wood, 10), (Good::Metal, 20)]),
        Good::Clothes => manufactured(10, &[(Good::Dye, 10), (Good::Textile, 10)]),
    }
}

/// Catalog of the recipes in effect for this process
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCatalog {
    recipes: AHashMap<Good, Recipe>,
}

impl RecipeCatalog {
    /// An empty catalog; every good produces and consumes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in recipe of every good
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for good in Good::ALL {
            catalog.add(good, default_recipe(good));
        }
        catalog
    }

    /// Register (or replace) the recipe of a good
    pub fn add(&mut self, good: Good, recipe: Recipe) {
        self.recipes.insert(good, recipe);
    }

    /// Recipe of a good, `None` when the good has none registered
    pub fn recipe_of(&self, good: Good) -> Option<&Recipe> {
        self.recipes.get(&good)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Load recipes from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, RecipeLoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RecipeLoadError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse recipes from a TOML string
    ///
    /// Only the goods listed in the document get a recipe.
    pub fn parse_toml(content: &str) -> Result<Self, RecipeLoadError> {
        let toml_data: TomlRecipes =
            toml::from_str(content).map_err(|e| RecipeLoadError::ParseError(e.to_string()))?;

        let mut catalog = Self::new();
        for recipe in toml_data.recipes {
            let (good, recipe) = recipe.into_recipe()?;
            if catalog.recipe_of(good).is_some() {
                return Err(RecipeLoadError::DuplicateGood(good));
            }
            catalog.add(good, recipe);
        }
        Ok(catalog)
    }
}

/// Error type for recipe loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeLoadError {
    IoError(String),
    ParseError(String),
    InvalidGood(String),
    ZeroYield(Good),
    ZeroInput { good: Good, input: Good },
    AmountTooLarge { good: Good, amount: Amount },
    DuplicateGood(Good),
}

impl std::fmt::Display for RecipeLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeLoadError::IoError(e) => write!(f, "IO error: {}", e),
            RecipeLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
            RecipeLoadError::InvalidGood(e) => write!(f, "Invalid good: {}", e),
            RecipeLoadError::ZeroYield(g) => write!(f, "Recipe for {} has zero yield", g),
            RecipeLoadError::ZeroInput { good, input } => {
                write!(f, "Recipe for {} consumes zero {}", good, input)
            }
            RecipeLoadError::AmountTooLarge { good, amount } => write!(
                f,
                "Recipe for {} uses amount {} (max {})",
                good, amount, MAX_RECIPE_AMOUNT
            ),
            RecipeLoadError::DuplicateGood(g) => write!(f, "Recipe for {} defined twice", g),
        }
    }
}

impl std::error::Error for RecipeLoadError {}

/// TOML representation of recipes file
#[derive(Debug, Deserialize)]
struct TomlRecipes {
    recipes: Vec<TomlRecipe>,
}

/// TOML representation of a single recipe
#[derive(Debug, Deserialize)]
struct TomlRecipe {
    good: String,
    yield_per_building: Amount,
    #[serde(default)]
    inputs: Vec<TomlInput>,
}

#[derive(Debug, Deserialize)]
struct TomlInput {
    good: String,
    amount: Amount,
}

fn parse_good(token: &str) -> Result<Good, RecipeLoadError> {
    Good::from_token(&token.to_lowercase())
        .ok_or_else(|| RecipeLoadError::InvalidGood(token.to_string()))
}

impl TomlRecipe {
    fn into_recipe(self) -> Result<(Good, Recipe), RecipeLoadError> {
        let good = parse_good(&self.good)?;
        if self.yield_per_building == 0 {
            return Err(RecipeLoadError::ZeroYield(good));
        }
        if self.yield_per_building > MAX_RECIPE_AMOUNT {
            return Err(RecipeLoadError::AmountTooLarge {
                good,
                amount: self.yield_per_building,
            });
        }

        let inputs = self
            .inputs
            .into_iter()
            .map(|input| {
                let input_good = parse_good(&input.good)?;
                if input.amount == 0 {
                    return Err(RecipeLoadError::ZeroInput {
                        good,
                        input: input_good,
                    });
                }
                if input.amount > MAX_RECIPE_AMOUNT {
                    return Err(RecipeLoadError::AmountTooLarge {
                        good,
                        amount: input.amount,
                    });
                }
                Ok((input_good, input.amount))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            good,
            Recipe {
                yield_per_building: self.yield_per_building,
                inputs,
            },
        ))
    }
}
