//! Weather API client for `OpenMeteo` integration
//!
//! This module provides HTTP client functionality for the `OpenMeteo`
//! geocoding and forecast endpoints. Each call is a single attempt bounded by
//! the configured timeout; failures are reported to the caller immediately.

use crate::config::ApiConfig;
use crate::models::{CurrentWeather, ForecastSeries};
use crate::weather::{self, CURRENT_FIELDS, DAILY_FIELDS, openmeteo};
use crate::weather_codes::Language;
use crate::{Result, WeatherMcpError};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Language hint sent to the geocoder, independent of the display language
const GEOCODING_LANGUAGE: &str = "fr";

/// Why a single upstream request did not yield a usable body
#[derive(Debug)]
pub enum UpstreamFailure {
    /// Non-2xx response
    Status(StatusCode),
    /// No response within the configured timeout
    Timeout(Duration),
    /// Connection or protocol error
    Transport(String),
    /// Body could not be decoded as the expected JSON
    Decode(String),
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamFailure::Status(status) => write!(
                f,
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            ),
            UpstreamFailure::Timeout(timeout) => {
                write!(f, "délai dépassé ({} ms)", timeout.as_millis())
            }
            UpstreamFailure::Transport(message) => write!(f, "erreur réseau ({message})"),
            UpstreamFailure::Decode(message) => write!(f, "réponse illisible ({message})"),
        }
    }
}

/// HTTP client for the `OpenMeteo` APIs
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// Endpoint configuration
    config: ApiConfig,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WeatherMcpError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Search the geocoding API for `query`, returning at most one result
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Vec<openmeteo::GeocodingResult>> {
        let url = format!(
            "{}?name={}&count=1&language={}&format=json",
            self.config.geocoding_url,
            urlencoding::encode(query),
            GEOCODING_LANGUAGE
        );

        let response: openmeteo::GeocodingResponse = self
            .get_json(&url)
            .await
            .map_err(|failure| WeatherMcpError::geocoding(format!("Erreur de géocodage: {failure}")))?;

        let results = response.results.unwrap_or_default();
        debug!("Geocoding returned {} result(s) for '{}'", results.len(), query);
        Ok(results)
    }

    /// Get current conditions for coordinates
    #[instrument(skip(self, location_name))]
    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        location_name: &str,
        language: Language,
    ) -> Result<CurrentWeather> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&wind_speed_unit=ms&timezone=auto&forecast_days=1",
            self.config.weather_url, latitude, longitude, CURRENT_FIELDS
        );

        let response: openmeteo::ForecastResponse = self
            .get_json(&url)
            .await
            .map_err(|failure| WeatherMcpError::weather_fetch(format!("Erreur API météo: {failure}")))?;

        let current = weather::current_block(response)?;
        Ok(CurrentWeather::from_openmeteo(
            &current,
            location_name.to_string(),
            language,
        ))
    }

    /// Get a daily forecast of `days` days for coordinates
    #[instrument(skip(self, location_name))]
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
        location_name: &str,
        language: Language,
    ) -> Result<ForecastSeries> {
        let url = format!(
            "{}?latitude={}&longitude={}&daily={}&wind_speed_unit=ms&timezone=auto&forecast_days={}",
            self.config.weather_url, latitude, longitude, DAILY_FIELDS, days
        );

        let response: openmeteo::ForecastResponse = self.get_json(&url).await.map_err(|failure| {
            WeatherMcpError::weather_fetch(format!("Erreur API prévisions: {failure}"))
        })?;

        let daily = weather::daily_block(response)?;
        let series = ForecastSeries::from_openmeteo(
            &daily,
            usize::from(days),
            location_name.to_string(),
            language,
        )?;

        if series.len() < usize::from(days) {
            warn!(
                "Upstream returned {} of {} requested forecast days",
                series.len(),
                days
            );
        }

        Ok(series)
    }

    /// Perform one GET request and decode its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> std::result::Result<T, UpstreamFailure> {
        debug!("OpenMeteo API request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            if e.is_timeout() {
                UpstreamFailure::Timeout(self.config.timeout())
            } else {
                UpstreamFailure::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned HTTP {}", status);
            return Err(UpstreamFailure::Status(status));
        }

        let body = response.json::<T>().await.map_err(|e| {
            warn!("Failed to decode upstream response: {}", e);
            if e.is_timeout() {
                UpstreamFailure::Timeout(self.config.timeout())
            } else {
                UpstreamFailure::Decode(e.to_string())
            }
        })?;

        info!(
            "Successful API request in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}
