//! CLI interface for dayaction

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, GlobalOptions};
