//! Command execution against a ledger session
//!
//! Expected failures (unknown city, missing building, failed save) become
//! report text; they never end the session.

use std::path::PathBuf;

use crate::command::parser::{Command, HELP};
use crate::core::error::LedgerError;
use crate::economy::recipe::RecipeCatalog;
use crate::ledger::{persist, Ledger};
use crate::ui::render::Renderer;

/// Everything a command loop needs: state, recipes and where to save
#[derive(Debug, Clone)]
pub struct Session {
    pub ledger: Ledger,
    pub recipes: RecipeCatalog,
    pub data_path: PathBuf,
    pub renderer: Renderer,
}

impl Session {
    pub fn new(ledger: Ledger, recipes: RecipeCatalog, data_path: PathBuf, renderer: Renderer) -> Self {
        Self {
            ledger,
            recipes,
            data_path,
            renderer,
        }
    }

    /// Persist the ledger to the session's data file
    pub fn save(&self) -> Result<(), LedgerError> {
        persist::save(&self.ledger, &self.data_path)
    }
}

/// Whether the loop should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub flow: Flow,
    /// Text to show the user, newline-terminated lines
    pub output: String,
}

impl Reply {
    fn show(output: String) -> Self {
        Self {
            flow: Flow::Continue,
            output,
        }
    }

    fn failed(error: LedgerError) -> Self {
        Self::show(format!("{}\n", error))
    }
}

/// Executes parsed commands
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(session: &mut Session, command: Command) -> Reply {
        let render = session.renderer;
        let ledger = &mut session.ledger;
        let recipes = &session.recipes;

        match command {
            Command::ListAll => Reply::show(render.listing(&ledger.list_all())),

            Command::ListCity(city) => match ledger.city_detail(&city, recipes) {
                Ok(detail) => Reply::show(render.city_detail(&detail)),
                Err(e) => Reply::failed(e),
            },

            Command::ListGroup(group) => match ledger.group_detail(group, recipes) {
                Ok(detail) => Reply::show(render.group_detail(&detail)),
                Err(e) => Reply::failed(e),
            },

            Command::SetBuilding { city, good, count } => {
                match ledger.set_building(&city, good, count) {
                    Ok(_) => Reply::show(format!(
                        "City [{}] building [{}] set to {}\n",
                        city, good, count
                    )),
                    Err(e) => Reply::failed(e),
                }
            }

            Command::Associate { group, cities } => {
                let outcome = ledger.associate_cities(group, &cities);
                Reply::show(render.associated(group, &outcome))
            }

            Command::UnsetBuilding { city, good } => match ledger.unset_building(&city, good) {
                Ok(cascade) => Reply::show(format!(
                    "City [{}] building [{}] unset\n{}",
                    city,
                    good,
                    render.cascade(&city, &cascade)
                )),
                Err(e) => Reply::failed(e),
            },

            Command::Unassociate { group, cities } => {
                match ledger.unassociate_cities(group, &cities) {
                    Ok(outcome) => Reply::show(render.unassociated(group, &outcome)),
                    Err(e) => Reply::failed(e),
                }
            }

            Command::RemoveCity(city) => match ledger.remove_city(&city) {
                Ok(cascade) => Reply::show(render.cascade(&city, &cascade)),
                Err(e) => Reply::failed(e),
            },

            Command::RemoveGroup(group) => match ledger.remove_group(group) {
                Ok(_) => Reply::show(render.groups_removed(&[group])),
                Err(e) => Reply::failed(e),
            },

            Command::Save => match session.save() {
                Ok(()) => Reply::show(format!("Saved to {}\n", session.data_path.display())),
                Err(e) => {
                    tracing::error!("Save failed: {}", e);
                    Reply::show(format!("Failed to save: {}\n", e))
                }
            },

            Command::Help => Reply::show(format!("{}\n", HELP)),

            Command::Exit => Reply {
                flow: Flow::Exit,
                output: String::new(),
            },
        }
    }
}
