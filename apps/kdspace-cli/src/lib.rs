//! kdspace-cli - command-line driver for kdspace point indexes
//!
//! Loads a point file into a k-d tree (and, where useful, the brute-force
//! set) and answers `info`, `nearest`, `range` and `verify` commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{run, Cli, Command};
pub use config::{Backend, CliConfig, OutputFormat};
pub use error::{CliError, CliResult};
