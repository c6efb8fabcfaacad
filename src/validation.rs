//! Validation of tool arguments
//!
//! Raw JSON argument objects are checked and normalised here, before any
//! network call. Messages are always in French.

use crate::weather_codes::Language;
use crate::{Result, WeatherMcpError};
use serde_json::{Map, Value};

/// Forecast length used when `days` is omitted
pub const DEFAULT_FORECAST_DAYS: u8 = 5;
/// Maximum forecast length accepted
pub const MAX_FORECAST_DAYS: u8 = 7;

/// Tool names exposed over MCP
pub const TOOL_GET_WEATHER: &str = "get_weather";
pub const TOOL_GET_WEATHER_FORECAST: &str = "get_weather_forecast";
pub const TOOL_GET_WEATHER_BY_COORDINATES: &str = "get_weather_by_coordinates";

/// Validated parameters of a city-based lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CityParams {
    pub city: String,
    pub country_code: Option<String>,
    pub language: Language,
}

/// Validated parameters of a forecast lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastParams {
    pub city: CityParams,
    pub days: u8,
}

/// Validated parameters of a coordinate lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateParams {
    pub latitude: f64,
    pub longitude: f64,
    pub language: Language,
}

/// A tool invocation, validated and tagged by pipeline variant
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    CurrentByCity(CityParams),
    ForecastByCity(ForecastParams),
    CurrentByCoordinates(CoordinateParams),
}

impl ToolRequest {
    /// Route a tool name to its variant and validate the arguments
    pub fn parse(tool: &str, arguments: &Value) -> Result<Self> {
        let route: fn(&Map<String, Value>) -> Result<Self> = match tool {
            TOOL_GET_WEATHER => |args| validate_city_params(args).map(Self::CurrentByCity),
            TOOL_GET_WEATHER_FORECAST => {
                |args| validate_forecast_params(args).map(Self::ForecastByCity)
            }
            TOOL_GET_WEATHER_BY_COORDINATES => {
                |args| validate_coordinates(args).map(Self::CurrentByCoordinates)
            }
            _ => return Err(WeatherMcpError::unknown_tool(tool)),
        };

        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(WeatherMcpError::validation(
                    "Les arguments de l'outil doivent être un objet JSON",
                ));
            }
        };

        route(args)
    }

    /// Tool name this request was parsed from
    #[must_use]
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolRequest::CurrentByCity(_) => TOOL_GET_WEATHER,
            ToolRequest::ForecastByCity(_) => TOOL_GET_WEATHER_FORECAST,
            ToolRequest::CurrentByCoordinates(_) => TOOL_GET_WEATHER_BY_COORDINATES,
        }
    }
}

/// Treat a missing key and an explicit `null` the same way
fn optional<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|value| !value.is_null())
}

fn validate_language(args: &Map<String, Value>) -> Result<Language> {
    let Some(value) = optional(args, "lang") else {
        return Ok(Language::default());
    };

    let unsupported = |shown: &str| {
        WeatherMcpError::validation(format!(
            "Langue non supportée: {shown}. Langues disponibles: {}",
            Language::supported_list()
        ))
    };

    match value.as_str() {
        Some(code) => code.parse().map_err(|_| unsupported(code)),
        None => Err(unsupported(&value.to_string())),
    }
}

/// Validate the parameters shared by all city-based tools
pub fn validate_city_params(args: &Map<String, Value>) -> Result<CityParams> {
    let city = optional(args, "city")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .ok_or_else(|| {
            WeatherMcpError::validation(
                "Le paramètre \"city\" est requis et doit être une chaîne de caractères",
            )
        })?;

    let country_code = match optional(args, "countryCode") {
        None => None,
        Some(value) => {
            let code = value
                .as_str()
                .filter(|code| is_country_code(code))
                .ok_or_else(|| {
                    WeatherMcpError::validation(
                        "Le paramètre \"countryCode\" doit être un code pays à 2 lettres (ex: FR, GB)",
                    )
                })?;
            Some(code.to_ascii_uppercase())
        }
    };

    Ok(CityParams {
        city: city.to_string(),
        country_code,
        language: validate_language(args)?,
    })
}

fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Validate the parameters of the forecast tool
pub fn validate_forecast_params(args: &Map<String, Value>) -> Result<ForecastParams> {
    let city = validate_city_params(args)?;

    let days = match optional(args, "days") {
        None => DEFAULT_FORECAST_DAYS,
        Some(value) => {
            let raw = value
                .as_f64()
                .filter(|days| (1.0..=f64::from(MAX_FORECAST_DAYS)).contains(days))
                .ok_or_else(|| {
                    WeatherMcpError::validation(
                        "Le paramètre \"days\" doit être un nombre entre 1 et 7",
                    )
                })?;
            round_days(raw)
        }
    };

    Ok(ForecastParams { city, days })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_days(days: f64) -> u8 {
    days.round() as u8
}

/// Validate geographic coordinates
pub fn validate_coordinates(args: &Map<String, Value>) -> Result<CoordinateParams> {
    let latitude = optional(args, "latitude")
        .and_then(Value::as_f64)
        .filter(|lat| (-90.0..=90.0).contains(lat))
        .ok_or_else(|| {
            WeatherMcpError::validation(
                "Le paramètre \"latitude\" doit être un nombre entre -90 et 90",
            )
        })?;

    let longitude = optional(args, "longitude")
        .and_then(Value::as_f64)
        .filter(|lon| (-180.0..=180.0).contains(lon))
        .ok_or_else(|| {
            WeatherMcpError::validation(
                "Le paramètre \"longitude\" doit être un nombre entre -180 et 180",
            )
        })?;

    Ok(CoordinateParams {
        latitude,
        longitude,
        language: validate_language(args)?,
    })
}
