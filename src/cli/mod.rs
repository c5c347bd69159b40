//! CLI module - argument parsing and default reference resolution

mod args;

pub use args::*;
