//! CLI module
//!
//! Command-line interface: parse the wallet and filters, fetch every
//! reachable trade, write the file and print a summary.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
