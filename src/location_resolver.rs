//! Location Resolution Module
//!
//! This module resolves a city name (and optional country code) into the
//! single best-match location reported by the geocoding API.

use crate::api::WeatherApiClient;
use crate::models::GeoLocation;
use crate::{Result, WeatherMcpError};
use tracing::debug;

/// Service for resolving city names
pub struct LocationResolver;

impl LocationResolver {
    /// Build the geocoder search query
    #[must_use]
    pub fn search_query(city: &str, country_code: Option<&str>) -> String {
        match country_code {
            Some(country) => format!("{city},{country}"),
            None => city.to_string(),
        }
    }

    /// Resolve a city name to coordinates via geocoding
    pub async fn resolve_city(
        api_client: &WeatherApiClient,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<GeoLocation> {
        let query = Self::search_query(city, country_code);
        debug!("Geocoding location name: {}", query);

        // Use the first (best) result
        let geocoding = api_client
            .geocode(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherMcpError::geocoding(format!("Ville \"{city}\" non trouvée")))?;

        let location = GeoLocation::new(
            geocoding.latitude,
            geocoding.longitude,
            GeoLocation::display_name_for(&geocoding.name, geocoding.country.as_deref()),
        );

        debug!(
            "Resolved location: {} at ({:.4}, {:.4})",
            location.display_name, location.latitude, location.longitude
        );

        Ok(location)
    }
}
