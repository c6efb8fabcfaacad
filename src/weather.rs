//! `OpenMeteo` response structures and conversion into display models
//!
//! The forecast endpoint is queried with `wind_speed_unit=ms`; wind speeds are
//! converted to km/h here, and every display value is rounded.

use crate::models::weather::{DEFAULT_VISIBILITY_KM, ms_to_kmh, round_display};
use crate::models::{CurrentWeather, ForecastDay, ForecastSeries};
use crate::weather_codes::{Language, describe};
use crate::{Result, WeatherMcpError};
use chrono::NaiveDate;

/// Instantaneous fields requested for current conditions
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,surface_pressure,wind_speed_10m,wind_direction_10m,uv_index,apparent_temperature,cloud_cover";

/// Daily aggregates requested for forecasts
pub const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,relative_humidity_2m_mean,wind_speed_10m_max,precipitation_probability_max";

/// `OpenMeteo` API response structures
pub mod openmeteo {
    use serde::Deserialize;

    /// Forecast endpoint response; only the block that was requested is present
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
        pub daily: Option<DailyData>,
    }

    /// Current conditions block
    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        #[serde(rename = "relative_humidity_2m")]
        pub humidity: f64,
        pub weather_code: i32,
        #[serde(rename = "surface_pressure")]
        pub pressure: f64,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: f64,
        #[serde(rename = "wind_direction_10m")]
        pub wind_direction: Option<f64>,
        pub uv_index: Option<f64>,
        pub apparent_temperature: f64,
        pub cloud_cover: f64,
    }

    /// Daily aggregates block; arrays are parallel to `time`
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<String>,
        pub weather_code: Option<Vec<Option<i32>>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f64>>>,
        #[serde(rename = "relative_humidity_2m_mean")]
        pub humidity_mean: Option<Vec<Option<f64>>>,
        #[serde(rename = "wind_speed_10m_max")]
        pub wind_speed_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "precipitation_probability_max")]
        pub precipitation_probability_max: Option<Vec<Option<f64>>>,
    }

    /// Geocoding search response
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }
}

fn malformed(detail: impl std::fmt::Display) -> WeatherMcpError {
    WeatherMcpError::weather_fetch(format!("Réponse météo invalide: {detail}"))
}

impl CurrentWeather {
    /// Build current conditions from the `current` block
    #[must_use]
    pub fn from_openmeteo(
        current: &openmeteo::CurrentData,
        location: String,
        language: Language,
    ) -> Self {
        Self {
            location,
            temperature_c: round_display(current.temperature),
            feels_like_c: round_display(current.apparent_temperature),
            description: describe(current.weather_code, language).to_string(),
            humidity_pct: round_display(current.humidity),
            wind_speed_kmh: round_display(ms_to_kmh(current.wind_speed)),
            pressure_hpa: round_display(current.pressure),
            cloud_cover_pct: round_display(current.cloud_cover),
            uv_index: current.uv_index,
            visibility_km: DEFAULT_VISIBILITY_KM,
            language,
        }
    }
}

/// Value at `index` of an optional parallel array
fn required_at<T: Copy>(values: Option<&Vec<Option<T>>>, index: usize, field: &str) -> Result<T> {
    values
        .and_then(|values| values.get(index).copied().flatten())
        .ok_or_else(|| malformed(format!("champ \"{field}\" manquant pour le jour {index}")))
}

impl ForecastSeries {
    /// Build at most `days` forecast days from the `daily` block.
    ///
    /// Fewer days upstream than requested truncates the series. A missing
    /// precipitation probability reads as 0; any other gap is an error.
    pub fn from_openmeteo(
        daily: &openmeteo::DailyData,
        days: usize,
        location: String,
        language: Language,
    ) -> Result<Self> {
        let count = days.min(daily.time.len());
        let mut forecast_days = Vec::with_capacity(count);

        for i in 0..count {
            let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d")
                .map_err(|e| malformed(format!("date \"{}\" illisible ({e})", daily.time[i])))?;

            let weather_code = required_at(daily.weather_code.as_ref(), i, "weather_code")?;
            let temp_min = required_at(daily.temperature_min.as_ref(), i, "temperature_2m_min")?;
            let temp_max = required_at(daily.temperature_max.as_ref(), i, "temperature_2m_max")?;
            let humidity =
                required_at(daily.humidity_mean.as_ref(), i, "relative_humidity_2m_mean")?;
            let wind_speed = required_at(daily.wind_speed_max.as_ref(), i, "wind_speed_10m_max")?;
            let precipitation = daily
                .precipitation_probability_max
                .as_ref()
                .and_then(|values| values.get(i).copied().flatten())
                .unwrap_or(0.0);

            forecast_days.push(ForecastDay {
                date,
                temp_min_c: round_display(temp_min),
                temp_max_c: round_display(temp_max),
                description: describe(weather_code, language).to_string(),
                humidity_pct: round_display(humidity),
                wind_speed_kmh: round_display(ms_to_kmh(wind_speed)),
                precipitation_probability_pct: round_display(precipitation),
            });
        }

        Ok(Self {
            location,
            language,
            days: forecast_days,
        })
    }
}

/// Extract the `current` block or report a malformed response
pub fn current_block(response: openmeteo::ForecastResponse) -> Result<openmeteo::CurrentData> {
    response
        .current
        .ok_or_else(|| malformed("bloc \"current\" absent"))
}

/// Extract the `daily` block or report a malformed response
pub fn daily_block(response: openmeteo::ForecastResponse) -> Result<openmeteo::DailyData> {
    response.daily.ok_or_else(|| malformed("bloc \"daily\" absent"))
}
