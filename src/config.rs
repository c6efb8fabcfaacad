//! Configuration management for the weather MCP server
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherMcpError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix, e.g. `METEO_MCP__API__TIMEOUT_MS`
pub const ENV_PREFIX: &str = "METEO_MCP";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Upstream API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Transport configuration
    #[serde(default)]
    pub server: TransportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream Open-Meteo endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Forecast endpoint
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// How the MCP server is reached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// `stdio` or `http`
    #[serde(default = "default_transport")]
    pub transport: String,
    /// Bind address for the HTTP transport
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Port for the HTTP transport
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    format!("meteo-mcp/{}", crate::VERSION)
}

fn default_transport() -> String {
    "stdio".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8089
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ServerConfig {
    /// Load configuration from specified path
    ///
    /// The result is not validated; callers validate once their own
    /// overrides are applied.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = config_path.or_else(Self::get_config_path);

        if let Some(config_file) = config_file {
            if explicit || config_file.exists() {
                builder = builder.add_source(
                    File::from(config_file.clone())
                        .required(explicit)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // Add environment variable overrides with METEO_MCP__ prefix
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ServerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meteo-mcp").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.geocoding_url.is_empty() {
            self.api.geocoding_url = default_geocoding_url();
        }
        if self.api.weather_url.is_empty() {
            self.api.weather_url = default_weather_url();
        }
        if self.api.user_agent.is_empty() {
            self.api.user_agent = default_user_agent();
        }
        if self.server.transport.is_empty() {
            self.server.transport = default_transport();
        }
        if self.server.bind_address.is_empty() {
            self.server.bind_address = default_bind_address();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_ms == 0 {
            return Err(WeatherMcpError::config("API timeout must be greater than 0 ms").into());
        }

        if self.api.timeout_ms > 60_000 {
            return Err(
                WeatherMcpError::config("API timeout cannot exceed 60000 ms").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherMcpError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherMcpError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_transports = ["stdio", "http"];
        if !valid_transports.contains(&self.server.transport.as_str()) {
            return Err(WeatherMcpError::config(format!(
                "Invalid transport '{}'. Must be one of: {}",
                self.server.transport,
                valid_transports.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("geocoding_url", &self.api.geocoding_url),
            ("weather_url", &self.api.weather_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherMcpError::config(format!(
                    "API {name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
