//! CLI command implementations
//!
//! `serve` loads the configuration and dataset, then blocks on the HTTP
//! server. `query` runs one request through the same parameter parser and
//! handler the HTTP surface uses.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{Event, Logger};
use crate::rest_api::{DataResponse, DatasetHandler, Limits, QueryParams, RestHandler};

use super::args::{Command, QueryArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, data, port } => serve(config.as_deref(), data, port),
        Command::Query(args) => query(&args),
    }
}

/// Resolve the server configuration: file (if any), then flag overrides
pub fn resolve_config(
    config_path: Option<&Path>,
    data: Option<PathBuf>,
    port: Option<u16>,
) -> CliResult<ServerConfig> {
    let mut config = match config_path {
        Some(path) => {
            let config = ServerConfig::load(path)?;
            Logger::event(
                Event::ConfigLoaded,
                &[("path", &path.display().to_string())],
            );
            config
        }
        None => ServerConfig::default(),
    };

    if let Some(data) = data {
        config.data_file = data;
    }
    if let Some(port) = port {
        config.port = port;
    }

    Ok(config)
}

/// Load the dataset, logging the outcome
pub fn load_dataset(path: &Path) -> CliResult<Dataset> {
    match Dataset::load(path) {
        Ok(dataset) => {
            Logger::event(
                Event::DatasetLoaded,
                &[
                    ("path", &path.display().to_string()),
                    ("records", &dataset.len().to_string()),
                ],
            );
            Ok(dataset)
        }
        Err(e) => {
            Logger::event(
                Event::DatasetLoadFailed,
                &[
                    ("path", &path.display().to_string()),
                    ("error", &e.to_string()),
                ],
            );
            Err(e.into())
        }
    }
}

/// Serve the dataset over HTTP until the process is stopped
pub fn serve(config_path: Option<&Path>, data: Option<PathBuf>, port: Option<u16>) -> CliResult<()> {
    let config = resolve_config(config_path, data, port)?;
    Logger::set_min_severity(config.log_level);

    let dataset = load_dataset(&config.data_file)?;
    let server = HttpServer::new(config, Arc::new(dataset));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Run one query against a data file and print the response
pub fn query(args: &QueryArgs) -> CliResult<()> {
    let dataset = load_dataset(&args.data)?;
    let response = execute_query(dataset, args)?;
    write_json(&response)
}

/// Run the query flags against a dataset with the default page limits
pub fn execute_query(dataset: Dataset, args: &QueryArgs) -> CliResult<DataResponse> {
    let raw: HashMap<String, String> = args
        .to_params()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    let params = QueryParams::parse(&raw)?;

    let handler = DatasetHandler::new(Arc::new(dataset), Limits::default());
    Ok(handler.query(&params)?)
}
