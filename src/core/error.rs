use std::fmt;

use thiserror::Error;

use crate::core::types::{BuildingCount, GroupIndex};
use crate::economy::good::Good;
use crate::economy::recipe::RecipeLoadError;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("City [{0}] not found")]
    CityNotFound(String),

    #[error("Group [{0}] not found")]
    GroupNotFound(GroupIndex),

    #[error("City [{city}] building [{good}] not found")]
    BuildingNotFound { city: String, good: Good },

    #[error("Building number must be positive, got {0}")]
    InvalidBuildingCount(BuildingCount),

    #[error("Data corrupted: {0}")]
    CorruptState(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Recipe error: {0}")]
    Recipes(#[from] RecipeLoadError),
}

impl LedgerError {
    /// Whether the error leaves the process unable to continue safely
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::CorruptState(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Partial-success condition reported alongside an applied mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Named city does not exist, so it cannot join a group
    UnknownCity(String),
    /// Named city is not a member of the group it was removed from
    NotAMember { city: String, group: GroupIndex },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownCity(city) => write!(f, "City [{}] not found", city),
            Warning::NotAMember { city, group } => {
                write!(f, "City [{}] not found in group [{}]", city, group)
            }
        }
    }
}
