//! Tradeable goods
//!
//! The set of goods is closed. Every good has a lowercase token used in
//! saved data and typed commands, and a capitalised display name.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tradeable commodity, raw or manufactured
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Good {
    Wood,
    Brick,
    Wheat,
    Fruit,
    Corn,
    Sugar,
    Hemp,
    Cotton,
    Dye,
    Tobacco,
    Coffee,
    Cacao,
    Metal,
    Bread,
    Meat,
    Rum,
    Rope,
    Textile,
    Tool,
    Clothes,
}

/// Token did not name any good
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid good '{0}'")]
pub struct UnknownGood(pub String);

impl Good {
    /// Every good, in declaration order
    pub const ALL: [Good; 20] = [
        Good::Wood,
        Good::Brick,
        Good::Wheat,
        Good::Fruit,
        Good::Corn,
        Good::Sugar,
        Good::Hemp,
        Good::Cotton,
        Good::Dye,
        Good::Tobacco,
        Good::Coffee,
        Good::Cacao,
        Good::Metal,
        Good::Bread,
        Good::Meat,
        Good::Rum,
        Good::Rope,
        Good::Textile,
        Good::Tool,
        Good::Clothes,
    ];

    /// Lowercase token, as written in data files and commands
    pub fn token(self) -> &'static str {
        match self {
            Good::Wood => "wood",
            Good::Brick => "brick",
            Good::Wheat => "wheat",
            Good::Fruit => "fruit",
            Good::Corn => "corn",
            Good::Sugar => "sugar",
            Good::Hemp => "hemp",
            Good::Cotton => "cotton",
            Good::Dye => "dye",
            Good::Tobacco => "tobacco",
            Good::Coffee => "coffee",
            Good::Cacao => "cacao",
            Good::Metal => "metal",
            Good::Bread => "bread",
            Good::Meat => "meat",
            Good::Rum => "rum",
            Good::Rope => "rope",
            Good::Textile => "textile",
            Good::Tool => "tool",
            Good::Clothes => "clothes",
        }
    }

    /// Look a good up by its lowercase token
    pub fn from_token(token: &str) -> Option<Good> {
        let good = match token {
            "wood" => Good::Wood,
            "brick" => Good::Brick,
            "wheat" => Good::Wheat,
            "fruit" => Good::Fruit,
            "corn" => Good::Corn,
            "sugar" => Good::Sugar,
            "hemp" => Good::Hemp,
            "cotton" => Good::Cotton,
            "dye" => Good::Dye,
            "tobacco" => Good::Tobacco,
            "coffee" => Good::Coffee,
            "cacao" => Good::Cacao,
            "metal" => Good::Metal,
            "bread" => Good::Bread,
            "meat" => Good::Meat,
            "rum" => Good::Rum,
            "rope" => Good::Rope,
            "textile" => Good::Textile,
            "tool" => Good::Tool,
            "clothes" => Good::Clothes,
            _ => return None,
        };
        Some(good)
    }
}

impl FromStr for Good {
    type Err = UnknownGood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Good::from_token(s).ok_or_else(|| UnknownGood(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_covers_all_goods() {
        for good in Good::ALL {
            assert_eq!(Good::from_token(good.token()), Some(good));
        }
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut tokens: Vec<_> = Good::ALL.iter().map(|g| g.token()).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), Good::ALL.len());
    }

    #[test]
    fn test_display_is_capitalised_name() {
        assert_eq!(Good::Wood.to_string(), "Wood");
        assert_eq!(Good::Clothes.to_string(), "Clothes");
    }

    #[test]
    fn test_unknown_token_is_error() {
        assert_eq!("silk".parse::<Good>(), Err(UnknownGood("silk".into())));
        // Tokens are lowercase only
        assert!("Wood".parse::<Good>().is_err());
        assert_eq!("tool".parse::<Good>(), Ok(Good::Tool));
    }

    #[test]
    fn test_serde_uses_tokens() {
        assert_eq!(serde_json::to_string(&Good::Textile).unwrap(), "\"textile\"");
        let good: Good = serde_json::from_str("\"cacao\"").unwrap();
        assert_eq!(good, Good::Cacao);
        assert!(serde_json::from_str::<Good>("\"Cacao\"").is_err());
    }
}
