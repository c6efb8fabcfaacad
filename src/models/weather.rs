//! Current weather model and unit conversions

use crate::weather_codes::Language;
use serde::{Deserialize, Serialize};

/// Visibility reported when the upstream does not provide one, in km
pub const DEFAULT_VISIBILITY_KM: i32 = 10;

/// Snapshot of current conditions, ready for display
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Location display name
    pub location: String,
    /// Temperature in Celsius
    pub temperature_c: i32,
    /// Apparent temperature in Celsius
    pub feels_like_c: i32,
    /// Localized description of the weather code
    pub description: String,
    /// Relative humidity percentage
    pub humidity_pct: i32,
    /// Wind speed in km/h
    pub wind_speed_kmh: i32,
    /// Surface pressure in hPa
    pub pressure_hpa: i32,
    /// Cloud cover percentage
    pub cloud_cover_pct: i32,
    /// UV index as reported upstream
    pub uv_index: Option<f64>,
    /// Visibility in kilometers
    pub visibility_km: i32,
    /// Language used for description and labels
    pub language: Language,
}

/// Convert wind speed from m/s to km/h
#[must_use]
pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * 3.6
}

/// Round a raw upstream value for display
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_display(value: f64) -> i32 {
    value.round() as i32
}
