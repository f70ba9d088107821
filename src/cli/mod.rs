//! CLI layer: argument parsing, command dispatch and the interactive menu

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod session;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
