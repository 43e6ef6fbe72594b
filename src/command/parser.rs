//! Parse typed command lines into structured commands
//!
//! Arguments are separated by whitespace. Where a command takes either a
//! city or a group, an argument that parses as an integer is a group index
//! and anything else is a city name.

use thiserror::Error;

use crate::core::types::{BuildingCount, GroupIndex};
use crate::economy::good::Good;

/// Text printed by `help`
pub const HELP: &str = "\
Commands:
* list: list all groups and cities
* list <cityName>: list the details of the given city
* list <groupIndex>: list the details of the city(s) in the given group
* set <cityName> <goodName> <buildingNum>: set the production building number of the given good in the given city
* set <groupIndex> <cityName> ...: associate the given city(s) to the given group
* unset <cityName> <goodName>: remove the production building of the given good in the given city
* unset <groupIndex> <cityName> ...: remove the association of the given city(s) from the given group
* remove <cityName>: remove the city by the given name
* remove <groupIndex>: remove the group by the given index
* save: save the data immediately
* help: print the help info about the commands
* exit: save and exit";

const LIST_USAGE: &str = "'list', 'list <cityName>' or 'list <groupIndex>'";
const SET_USAGE: &str = "'set <cityName> <goodName> <buildingNum>' or 'set <groupIndex> <cityName> ...'";
const SET_CITY_USAGE: &str = "'set <cityName> <goodName> <buildingNum>'";
const SET_GROUP_USAGE: &str = "'set <groupIndex> <cityName> ...'";
const UNSET_USAGE: &str = "'unset <cityName> <goodName>' or 'unset <groupIndex> <cityName> ...'";
const UNSET_CITY_USAGE: &str = "'unset <cityName> <goodName>'";
const UNSET_GROUP_USAGE: &str = "'unset <groupIndex> <cityName> ...'";
const REMOVE_USAGE: &str = "'remove <cityName>' or 'remove <groupIndex>'";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListAll,
    ListCity(String),
    ListGroup(GroupIndex),
    SetBuilding {
        city: String,
        good: Good,
        count: BuildingCount,
    },
    Associate {
        group: GroupIndex,
        cities: Vec<String>,
    },
    UnsetBuilding {
        city: String,
        good: Good,
    },
    Unassociate {
        group: GroupIndex,
        cities: Vec<String>,
    },
    RemoveCity(String),
    RemoveGroup(GroupIndex),
    Save,
    Help,
    Exit,
}

/// Input rejected before it reaches the ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command; Input 'help' to see the available commands")]
    UnknownCommand(String),

    #[error("Invalid command; Available patterns: {0}")]
    Usage(&'static str),

    #[error("Invalid good '{0}'")]
    InvalidGood(String),

    #[error("Invalid building number '{0}'")]
    InvalidNumber(String),

    #[error("Building number must be positive")]
    NonPositiveCount(i64),
}

/// City name or group index, decided by whether the token is an integer
enum Target<'a> {
    City(&'a str),
    Group(GroupIndex),
}

impl<'a> Target<'a> {
    fn of(token: &'a str) -> Self {
        match token.parse::<GroupIndex>() {
            Ok(index) => Target::Group(index),
            Err(_) => Target::City(token),
        }
    }
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb {
        "list" => parse_list(&args)?,
        "set" => parse_set(&args)?,
        "unset" => parse_unset(&args)?,
        "remove" => parse_remove(&args)?,
        "save" => Command::Save,
        "help" => Command::Help,
        "exit" => Command::Exit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_list(args: &[&str]) -> Result<Command, CommandError> {
    match args {
        [] => Ok(Command::ListAll),
        [target] => Ok(match Target::of(target) {
            Target::City(city) => Command::ListCity(city.to_string()),
            Target::Group(group) => Command::ListGroup(group),
        }),
        _ => Err(CommandError::Usage(LIST_USAGE)),
    }
}

fn parse_set(args: &[&str]) -> Result<Command, CommandError> {
    let (target, rest) = args.split_first().ok_or(CommandError::Usage(SET_USAGE))?;
    match Target::of(target) {
        Target::City(city) => match rest {
            [good, count] => Ok(Command::SetBuilding {
                city: city.to_string(),
                good: parse_good(good)?,
                count: parse_count(count)?,
            }),
            _ => Err(CommandError::Usage(SET_CITY_USAGE)),
        },
        Target::Group(group) => {
            if rest.is_empty() {
                return Err(CommandError::Usage(SET_GROUP_USAGE));
            }
            Ok(Command::Associate {
                group,
                cities: rest.iter().map(|c| c.to_string()).collect(),
            })
        }
    }
}

fn parse_unset(args: &[&str]) -> Result<Command, CommandError> {
    let (target, rest) = args.split_first().ok_or(CommandError::Usage(UNSET_USAGE))?;
    match Target::of(target) {
        Target::City(city) => match rest {
            [good] => Ok(Command::UnsetBuilding {
                city: city.to_string(),
                good: parse_good(good)?,
            }),
            _ => Err(CommandError::Usage(UNSET_CITY_USAGE)),
        },
        Target::Group(group) => {
            if rest.is_empty() {
                return Err(CommandError::Usage(UNSET_GROUP_USAGE));
            }
            Ok(Command::Unassociate {
                group,
                cities: rest.iter().map(|c| c.to_string()).collect(),
            })
        }
    }
}

fn parse_remove(args: &[&str]) -> Result<Command, CommandError> {
    match args {
        [target] => Ok(match Target::of(target) {
            Target::City(city) => Command::RemoveCity(city.to_string()),
            Target::Group(group) => Command::RemoveGroup(group),
        }),
        _ => Err(CommandError::Usage(REMOVE_USAGE)),
    }
}

fn parse_good(token: &str) -> Result<Good, CommandError> {
    Good::from_token(token).ok_or_else(|| CommandError::InvalidGood(token.to_string()))
}

fn parse_count(token: &str) -> Result<BuildingCount, CommandError> {
    let count: i64 = token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))?;
    if count <= 0 {
        return Err(CommandError::NonPositiveCount(count));
    }
    BuildingCount::try_from(count).map_err(|_| CommandError::InvalidNumber(token.to_string()))
}
