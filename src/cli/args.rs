//! CLI argument definitions using clap
//!
//! Commands:
//! - datatable serve [--config <path>] [--data <path>] [--port <n>]
//! - datatable query --data <path> [query flags]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// datatable - Filter, sort and paginate nested JSON records
#[derive(Parser, Debug)]
#[command(name = "datatable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dataset over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data file (overrides the config)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Port to bind (overrides the config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run a single query and print the JSON response
    Query(QueryArgs),
}

/// Flags of the `query` command, named like the HTTP parameters
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Data file to query
    #[arg(long)]
    pub data: PathBuf,

    /// Comma-separated field paths
    #[arg(long)]
    pub columns: Option<String>,

    /// Comma-separated `path:expression` pairs
    #[arg(long)]
    pub filters: Option<String>,

    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Comma-separated sort keys
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Comma-separated asc|desc
    #[arg(long)]
    pub sort_order: Option<String>,

    #[arg(long)]
    pub page: Option<String>,

    #[arg(long)]
    pub limit: Option<String>,

    /// flat or nested
    #[arg(long)]
    pub format: Option<String>,
}

impl QueryArgs {
    /// The flags as HTTP-style query parameters
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        [
            ("columns", &self.columns),
            ("filters", &self.filters),
            ("search", &self.search),
            ("sort_by", &self.sort_by),
            ("sort_order", &self.sort_order),
            ("page", &self.page),
            ("limit", &self.limit),
            ("format", &self.format),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "datatable",
            "query",
            "--data",
            "users.json",
            "--filters",
            "city:Berlin",
            "--sort-by",
            "id",
            "--limit",
            "5",
        ])
        .unwrap();

        let Command::Query(args) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.data, PathBuf::from("users.json"));
        assert_eq!(
            args.to_params(),
            vec![
                ("filters", "city:Berlin".to_string()),
                ("sort_by", "id".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["datatable", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { config, data, port } => {
                assert!(config.is_none());
                assert!(data.is_none());
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_query_requires_data() {
        assert!(Cli::try_parse_from(["datatable", "query"]).is_err());
    }
}
