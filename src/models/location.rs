//! Geocoded location model

use serde::{Deserialize, Serialize};

/// Best-match location returned by the geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name, e.g. "Paris, France"
    pub display_name: String,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, display_name: String) -> Self {
        Self {
            latitude,
            longitude,
            display_name,
        }
    }

    /// Build the display name from a place name and an optional country
    #[must_use]
    pub fn display_name_for(name: &str, country: Option<&str>) -> String {
        match country.filter(|c| !c.is_empty()) {
            Some(country) => format!("{name}, {country}"),
            None => name.to_string(),
        }
    }

    /// Format coordinates as a location name
    #[must_use]
    pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
        format!("{latitude:.4}, {longitude:.4}")
    }
}
