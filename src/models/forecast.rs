//! Daily forecast models

use crate::weather_codes::Language;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of forecast, ready for display
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Local calendar date (serialised as ISO date)
    pub date: NaiveDate,
    /// Minimum temperature in Celsius
    pub temp_min_c: i32,
    /// Maximum temperature in Celsius
    pub temp_max_c: i32,
    /// Localized description of the weather code
    pub description: String,
    /// Mean relative humidity percentage
    pub humidity_pct: i32,
    /// Maximum wind speed in km/h
    pub wind_speed_kmh: i32,
    /// Maximum precipitation probability percentage
    pub precipitation_probability_pct: i32,
}

/// Forecast days for one location, ordered by date ascending
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSeries {
    /// Location display name
    pub location: String,
    /// Language used for descriptions and labels
    pub language: Language,
    /// Forecast days
    pub days: Vec<ForecastDay>,
}

impl ForecastSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// True when the days are in strictly ascending date order
    #[must_use]
    pub fn is_chronological(&self) -> bool {
        self.days.windows(2).all(|pair| pair[0].date < pair[1].date)
    }
}
