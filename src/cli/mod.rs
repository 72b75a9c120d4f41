//! Command-line interface for debate-coach.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands};
