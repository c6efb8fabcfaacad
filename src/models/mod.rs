//! Data models for the weather MCP server
//!
//! This module contains the per-request domain models organized by concern:
//! - Location: Geocoded coordinates and display name
//! - Weather: Current conditions snapshot
//! - Forecast: Daily forecast entries and series

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{ForecastDay, ForecastSeries};
pub use location::GeoLocation;
pub use weather::CurrentWeather;
