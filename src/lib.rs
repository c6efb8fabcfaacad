//! `meteo-mcp` - Weather tools for AI assistants over the Model Context Protocol
//!
//! This library resolves city names with the Open-Meteo geocoder, fetches
//! current conditions and daily forecasts, and renders them as localized
//! text for MCP clients.

pub mod api;
pub mod config;
pub mod error;
pub mod formatter;
pub mod location_resolver;
pub mod mcp;
pub mod models;
pub mod service;
pub mod telemetry;
pub mod validation;
pub mod weather;
pub mod weather_codes;
pub mod web;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::ServerConfig;
pub use error::{ErrorKind, WeatherMcpError};
pub use mcp::McpServer;
pub use models::{CurrentWeather, ForecastDay, ForecastSeries, GeoLocation};
pub use service::WeatherService;
pub use validation::ToolRequest;
pub use weather_codes::Language;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherMcpError>;
