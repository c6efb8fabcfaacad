//! meteo-mcp - Entry Point
//!
//! Serves the weather tools over stdio (default) or HTTP.

use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use meteo_mcp::{McpServer, ServerConfig, WeatherService, mcp, telemetry, web};

/// meteo-mcp - Weather tools for AI assistants
#[derive(FromArgs)]
struct Args {
    /// path to a TOML configuration file
    #[argh(option)]
    config: Option<PathBuf>,

    /// transport to serve on: stdio or http
    #[argh(option)]
    transport: Option<String>,

    /// port for the http transport
    #[argh(option)]
    port: Option<u16>,

    /// log level (error, warn, info, debug, trace)
    #[argh(option)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let mut config =
        ServerConfig::load_from_path(args.config).context("Failed to load configuration")?;

    if let Some(transport) = args.transport {
        config.server.transport = transport;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate().context("Invalid configuration")?;

    telemetry::init_tracing(&config.logging)?;

    tracing::info!("Starting meteo-mcp v{}", meteo_mcp::VERSION);
    tracing::debug!("Configuration: {:?}", config);

    let service = WeatherService::new(&config.api)?;
    let server = McpServer::new(service);

    match config.server.transport.as_str() {
        "http" => web::run(&config.server, server).await,
        _ => mcp::stdio::run_stdio(server).await,
    }
}
