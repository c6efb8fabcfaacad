//! Text rendering of weather results
//!
//! Labels exist for French, English, Spanish and German; other languages use
//! the French labels. Dates are rendered in the locale of the request
//! language.

use crate::models::{CurrentWeather, ForecastDay, ForecastSeries};
use crate::weather_codes::Language;
use chrono::{Locale, NaiveDate};

/// Pattern for forecast day headings, e.g. "samedi 1 juin"
const DATE_PATTERN: &str = "%A %-d %B";

/// Separator between forecast day blocks
pub const DAY_SEPARATOR: &str = "\n---\n\n";

struct Labels {
    current_title: &'static str,
    forecast_title: &'static str,
    temperature: &'static str,
    feels_like: &'static str,
    conditions: &'static str,
    humidity: &'static str,
    wind: &'static str,
    pressure: &'static str,
    cloud_cover: &'static str,
    visibility: &'static str,
    uv_index: &'static str,
    precipitation: &'static str,
}

const FR: Labels = Labels {
    current_title: "Météo actuelle à",
    forecast_title: "Prévisions météo pour",
    temperature: "Température",
    feels_like: "ressenti",
    conditions: "Conditions",
    humidity: "Humidité",
    wind: "Vent",
    pressure: "Pression",
    cloud_cover: "Couverture nuageuse",
    visibility: "Visibilité",
    uv_index: "Index UV",
    precipitation: "Précipitations",
};

const EN: Labels = Labels {
    current_title: "Current weather in",
    forecast_title: "Weather forecast for",
    temperature: "Temperature",
    feels_like: "feels like",
    conditions: "Conditions",
    humidity: "Humidity",
    wind: "Wind",
    pressure: "Pressure",
    cloud_cover: "Cloud cover",
    visibility: "Visibility",
    uv_index: "UV index",
    precipitation: "Precipitation",
};

const ES: Labels = Labels {
    current_title: "Tiempo actual en",
    forecast_title: "Previsión meteorológica para",
    temperature: "Temperatura",
    feels_like: "sensación",
    conditions: "Condiciones",
    humidity: "Humedad",
    wind: "Viento",
    pressure: "Presión",
    cloud_cover: "Nubosidad",
    visibility: "Visibilidad",
    uv_index: "Índice UV",
    precipitation: "Precipitaciones",
};

const DE: Labels = Labels {
    current_title: "Aktuelles Wetter in",
    forecast_title: "Wettervorhersage für",
    temperature: "Temperatur",
    feels_like: "gefühlt",
    conditions: "Bedingungen",
    humidity: "Luftfeuchtigkeit",
    wind: "Wind",
    pressure: "Luftdruck",
    cloud_cover: "Bewölkung",
    visibility: "Sichtweite",
    uv_index: "UV-Index",
    precipitation: "Niederschlag",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Es => &ES,
        Language::De => &DE,
        Language::Fr | Language::It | Language::Pt | Language::Ru | Language::Zh | Language::Ja => {
            &FR
        }
    }
}

fn locale(language: Language) -> Locale {
    match language {
        Language::Fr => Locale::fr_FR,
        Language::En => Locale::en_US,
        Language::Es => Locale::es_ES,
        Language::De => Locale::de_DE,
        Language::It => Locale::it_IT,
        Language::Pt => Locale::pt_PT,
        Language::Ru => Locale::ru_RU,
        Language::Zh => Locale::zh_CN,
        Language::Ja => Locale::ja_JP,
    }
}

/// Localized heading for a forecast date
#[must_use]
pub fn format_date(date: NaiveDate, language: Language) -> String {
    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => midnight
            .and_utc()
            .format_localized(DATE_PATTERN, locale(language))
            .to_string(),
        None => date.to_string(),
    }
}

/// Render current conditions
#[must_use]
pub fn format_current(weather: &CurrentWeather) -> String {
    let l = labels(weather.language);
    let mut text = format!(
        "🌤️ **{} {}**\n\n\
         🌡️ **{}**: {}°C ({} {}°C)\n\
         ☁️ **{}**: {}\n\
         💧 **{}**: {}%\n\
         🌪️ **{}**: {} km/h\n\
         📊 **{}**: {} hPa\n\
         ☁️ **{}**: {}%\n\
         👁️ **{}**: {} km",
        l.current_title,
        weather.location,
        l.temperature,
        weather.temperature_c,
        l.feels_like,
        weather.feels_like_c,
        l.conditions,
        weather.description,
        l.humidity,
        weather.humidity_pct,
        l.wind,
        weather.wind_speed_kmh,
        l.pressure,
        weather.pressure_hpa,
        l.cloud_cover,
        weather.cloud_cover_pct,
        l.visibility,
        weather.visibility_km,
    );

    if let Some(uv) = weather.uv_index.filter(|uv| *uv > 0.0) {
        text.push_str(&format!("\n☀️ **{}**: {}", l.uv_index, uv));
    }

    text
}

fn format_day(day: &ForecastDay, language: Language) -> String {
    let l = labels(language);
    format!(
        "**{}**\n\
         🌡️ {}°C / {}°C\n\
         ☁️ {}\n\
         💧 {}: {}%\n\
         🌪️ {}: {} km/h\n\
         🌧️ {}: {}%\n",
        format_date(day.date, language),
        day.temp_min_c,
        day.temp_max_c,
        day.description,
        l.humidity,
        day.humidity_pct,
        l.wind,
        day.wind_speed_kmh,
        l.precipitation,
        day.precipitation_probability_pct,
    )
}

/// Render a forecast series under its location name
#[must_use]
pub fn format_forecast(series: &ForecastSeries) -> String {
    let l = labels(series.language);
    let blocks: Vec<String> = series
        .days
        .iter()
        .map(|day| format_day(day, series.language))
        .collect();

    format!(
        "📅 **{} {}**\n\n{}",
        l.forecast_title,
        series.location,
        blocks.join(DAY_SEPARATOR)
    )
}
