//! Tool catalogue advertised through `tools/list`

use crate::validation::{
    DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS, TOOL_GET_WEATHER, TOOL_GET_WEATHER_BY_COORDINATES,
    TOOL_GET_WEATHER_FORECAST,
};
use crate::weather_codes::Language;
use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

fn object_schema(properties: JsonObject, required: &[&str]) -> JsonObject {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), json!(required));
    schema
}

fn language_schema() -> Value {
    let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
    json!({
        "type": "string",
        "description": "Langue pour la description (ex: fr, en, es)",
        "enum": codes,
        "default": Language::default().code()
    })
}

fn city_properties() -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert(
        "city".to_string(),
        json!({
            "type": "string",
            "description": "Nom de la ville (ex: Paris, London, New York)"
        }),
    );
    properties.insert(
        "countryCode".to_string(),
        json!({
            "type": "string",
            "description": "Code pays optionnel (ex: FR, US, GB)",
            "pattern": "^[A-Z]{2}$"
        }),
    );
    properties.insert("lang".to_string(), language_schema());
    properties
}

/// The three weather tools
#[must_use]
pub fn catalogue() -> Vec<Tool> {
    let mut forecast_properties = city_properties();
    forecast_properties.insert(
        "days".to_string(),
        json!({
            "type": "number",
            "description": "Nombre de jours de prévision (1 à 7)",
            "minimum": 1,
            "maximum": MAX_FORECAST_DAYS,
            "default": DEFAULT_FORECAST_DAYS
        }),
    );

    let mut coordinate_properties = JsonObject::new();
    coordinate_properties.insert(
        "latitude".to_string(),
        json!({
            "type": "number",
            "description": "Latitude",
            "minimum": -90,
            "maximum": 90
        }),
    );
    coordinate_properties.insert(
        "longitude".to_string(),
        json!({
            "type": "number",
            "description": "Longitude",
            "minimum": -180,
            "maximum": 180
        }),
    );
    coordinate_properties.insert("lang".to_string(), language_schema());

    vec![
        Tool::new(
            TOOL_GET_WEATHER,
            "Obtient les informations météorologiques actuelles pour une ville",
            object_schema(city_properties(), &["city"]),
        ),
        Tool::new(
            TOOL_GET_WEATHER_FORECAST,
            "Obtient les prévisions météorologiques sur plusieurs jours pour une ville",
            object_schema(forecast_properties, &["city"]),
        ),
        Tool::new(
            TOOL_GET_WEATHER_BY_COORDINATES,
            "Obtient les informations météorologiques actuelles par coordonnées GPS",
            object_schema(coordinate_properties, &["latitude", "longitude"]),
        ),
    ]
}
