//! Harbor Ledger - production balances for a colonial trading game

pub mod command;
pub mod core;
pub mod economy;
pub mod ledger;
pub mod ui;
