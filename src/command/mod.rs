//! Command pipeline
//!
//! Typed line -> `parse_command` -> `Command` -> `CommandExecutor` -> `Reply`

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, Flow, Reply, Session};
pub use parser::{parse_command, Command, CommandError, HELP};
