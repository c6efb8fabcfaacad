//! Tool execution pipeline
//!
//! Each tool call is validated, geocoded when it names a city, fetched from
//! the forecast API and rendered to text.

use crate::api::WeatherApiClient;
use crate::config::ApiConfig;
use crate::formatter::{format_current, format_forecast};
use crate::location_resolver::LocationResolver;
use crate::models::GeoLocation;
use crate::validation::{CityParams, CoordinateParams, ForecastParams, ToolRequest};
use crate::Result;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Executes weather tools against the upstream APIs
#[derive(Debug, Clone)]
pub struct WeatherService {
    api: WeatherApiClient,
}

impl WeatherService {
    /// Create a service from the upstream API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            api: WeatherApiClient::new(config.clone())?,
        })
    }

    /// Run the tool `name` with its raw JSON `arguments`
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> Result<String> {
        let start_time = Instant::now();

        let request = ToolRequest::parse(name, arguments).inspect_err(|e| {
            warn!("Rejected call to tool {}: {}", name, e);
        })?;
        debug!("Validated request: {:?}", request);

        let result = match request {
            ToolRequest::CurrentByCity(params) => self.current_by_city(params).await,
            ToolRequest::ForecastByCity(params) => self.forecast_by_city(params).await,
            ToolRequest::CurrentByCoordinates(params) => self.current_by_coordinates(params).await,
        };

        match &result {
            Ok(text) => info!(
                "Tool {} completed in {:.3}s ({} chars)",
                name,
                start_time.elapsed().as_secs_f64(),
                text.len()
            ),
            Err(e) => warn!("Tool {} failed: {}", name, e),
        }

        result
    }

    async fn current_by_city(&self, params: CityParams) -> Result<String> {
        info!(
            "Current weather for {} ({})",
            params.city,
            params.country_code.as_deref().unwrap_or("-")
        );

        let location =
            LocationResolver::resolve_city(&self.api, &params.city, params.country_code.as_deref())
                .await?;

        let weather = self
            .api
            .current_weather(
                location.latitude,
                location.longitude,
                &location.display_name,
                params.language,
            )
            .await?;

        Ok(format_current(&weather))
    }

    async fn forecast_by_city(&self, params: ForecastParams) -> Result<String> {
        let ForecastParams { city, days } = params;
        info!("{}-day forecast for {}", days, city.city);

        let location =
            LocationResolver::resolve_city(&self.api, &city.city, city.country_code.as_deref())
                .await?;

        let series = self
            .api
            .forecast(
                location.latitude,
                location.longitude,
                days,
                &location.display_name,
                city.language,
            )
            .await?;

        Ok(format_forecast(&series))
    }

    async fn current_by_coordinates(&self, params: CoordinateParams) -> Result<String> {
        let location_name = GeoLocation::format_coordinates(params.latitude, params.longitude);
        info!("Current weather at {}", location_name);

        let weather = self
            .api
            .current_weather(
                params.latitude,
                params.longitude,
                &location_name,
                params.language,
            )
            .await?;

        Ok(format_current(&weather))
    }
}
