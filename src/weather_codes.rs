//! WMO weather code descriptions and display languages
//!
//! Open-Meteo reports conditions as WMO codes. Descriptions exist in French,
//! English, Spanish and German; every other supported language reads the
//! French column.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language accepted by the tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Es,
    De,
    It,
    Pt,
    Ru,
    Zh,
    Ja,
}

impl Language {
    /// All supported languages, in the order they are advertised
    pub const ALL: [Language; 9] = [
        Language::Fr,
        Language::En,
        Language::Es,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ru,
        Language::Zh,
        Language::Ja,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }

    /// Comma-separated list of supported codes, for error messages
    #[must_use]
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|lang| lang.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One row of the description table
struct CodeDescription {
    code: i32,
    fr: &'static str,
    en: &'static str,
    es: &'static str,
    de: &'static str,
}

const fn row(
    code: i32,
    fr: &'static str,
    en: &'static str,
    es: &'static str,
    de: &'static str,
) -> CodeDescription {
    CodeDescription { code, fr, en, es, de }
}

static WEATHER_CODE_TABLE: &[CodeDescription] = &[
    row(0, "Ciel dégagé", "Clear sky", "Cielo despejado", "Klarer Himmel"),
    row(1, "Principalement dégagé", "Mainly clear", "Principalmente despejado", "Überwiegend klar"),
    row(2, "Partiellement nuageux", "Partly cloudy", "Parcialmente nublado", "Teilweise bewölkt"),
    row(3, "Couvert", "Overcast", "Nublado", "Bedeckt"),
    row(45, "Brouillard", "Fog", "Niebla", "Nebel"),
    row(48, "Brouillard givrant", "Depositing rime fog", "Niebla helada", "Reifnebel"),
    row(51, "Bruine légère", "Light drizzle", "Llovizna ligera", "Leichter Nieselregen"),
    row(53, "Bruine modérée", "Moderate drizzle", "Llovizna moderada", "Mäßiger Nieselregen"),
    row(55, "Bruine forte", "Dense drizzle", "Llovizna densa", "Dichter Nieselregen"),
    row(61, "Pluie légère", "Light rain", "Lluvia ligera", "Leichter Regen"),
    row(63, "Pluie modérée", "Moderate rain", "Lluvia moderada", "Mäßiger Regen"),
    row(65, "Pluie forte", "Heavy rain", "Lluvia fuerte", "Starker Regen"),
    row(71, "Neige légère", "Light snow", "Nieve ligera", "Leichter Schnee"),
    row(73, "Neige modérée", "Moderate snow", "Nieve moderada", "Mäßiger Schnee"),
    row(75, "Neige forte", "Heavy snow", "Nieve fuerte", "Starker Schnee"),
    row(80, "Averses légères", "Light rain showers", "Chubascos ligeros", "Leichte Regenschauer"),
    row(81, "Averses modérées", "Moderate rain showers", "Chubascos moderados", "Mäßige Regenschauer"),
    row(82, "Averses violentes", "Violent rain showers", "Chubascos violentos", "Heftige Regenschauer"),
    row(95, "Orage", "Thunderstorm", "Tormenta", "Gewitter"),
    row(96, "Orage avec grêle légère", "Thunderstorm with light hail", "Tormenta con granizo ligero", "Gewitter mit leichtem Hagel"),
    row(99, "Orage avec grêle forte", "Thunderstorm with heavy hail", "Tormenta con granizo fuerte", "Gewitter mit schwerem Hagel"),
];

/// Convert a WMO weather code to a description in `lang`
#[must_use]
pub fn describe(code: i32, lang: Language) -> &'static str {
    match WEATHER_CODE_TABLE.iter().find(|entry| entry.code == code) {
        Some(entry) => match lang {
            Language::En => entry.en,
            Language::Es => entry.es,
            Language::De => entry.de,
            // No column for the remaining languages; French is the default.
            Language::Fr | Language::It | Language::Pt | Language::Ru | Language::Zh | Language::Ja => {
                entry.fr
            }
        },
        None => match lang {
            Language::En => "Unknown conditions",
            _ => "Conditions inconnues",
        },
    }
}
