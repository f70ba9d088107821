//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Course catalog planner: load a CSV catalog, list courses, look up prerequisites
#[derive(Parser, Debug)]
#[command(name = "coursetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (overrides the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all courses in alphanumeric order
    List {
        /// Catalog file (default: configured catalog)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print one course with its prerequisites
    Show {
        /// Course number (case-insensitive)
        course: String,
        /// Catalog file (default: configured catalog)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Validate a catalog and report rejected records
    Check {
        /// Catalog file (default: configured catalog)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show the shape of the search tree
    Tree {
        /// Catalog file (default: configured catalog)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Interactive course planner menu
    Menu,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
