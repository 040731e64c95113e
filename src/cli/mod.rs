//! CLI module for datatable
//!
//! Provides command-line interface for:
//! - serve: Load the dataset and serve it over HTTP
//! - query: One-shot query printed as JSON

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, QueryArgs};
pub use commands::{
    execute_query, load_dataset, query, resolve_config, run, run_command, serve,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};
