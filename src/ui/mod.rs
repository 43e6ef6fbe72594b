//! Terminal output for the ledger REPL

pub mod render;

pub use render::Renderer;
