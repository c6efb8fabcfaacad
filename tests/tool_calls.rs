//! End-to-end tool calls over an MCP client session against mocked
//! Open-Meteo endpoints

use std::time::Duration;

use meteo_mcp::config::ApiConfig;
use meteo_mcp::{McpServer, WeatherService};
use rmcp::model::{CallToolRequestParams, CallToolResult, ClientInfo, ErrorCode};
use rmcp::service::RunningService;
use rmcp::{ClientHandler, ErrorData, RoleClient, ServiceError, ServiceExt};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOCODING_PATH: &str = "/v1/search";
const FORECAST_PATH: &str = "/v1/forecast";

#[derive(Debug, Clone, Default)]
struct TestClient;

impl ClientHandler for TestClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

type Client = RunningService<RoleClient, TestClient>;

fn server_for(mock: &MockServer, timeout_ms: u64) -> McpServer {
    let config = ApiConfig {
        geocoding_url: format!("{}{}", mock.uri(), GEOCODING_PATH),
        weather_url: format!("{}{}", mock.uri(), FORECAST_PATH),
        timeout_ms,
        ..ApiConfig::default()
    };
    McpServer::new(WeatherService::new(&config).unwrap())
}

/// Open a client session on a server backed by `mock`
async fn connect(mock: &MockServer) -> Client {
    connect_with_timeout(mock, 2000).await
}

async fn connect_with_timeout(mock: &MockServer, timeout_ms: u64) -> Client {
    let server = server_for(mock, timeout_ms);
    let (server_transport, client_transport) = tokio::io::duplex(65536);
    tokio::spawn(async move {
        if let Ok(session) = server.serve(server_transport).await {
            let _ = session.waiting().await;
        }
    });
    TestClient.serve(client_transport).await.unwrap()
}

async fn call_tool(
    client: &Client,
    name: &str,
    arguments: Value,
) -> Result<CallToolResult, ServiceError> {
    let arguments = match arguments {
        Value::Object(map) => Some(map),
        _ => None,
    };
    client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: name.to_string().into(),
            arguments,
            task: None,
        })
        .await
}

fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.clone())
        .unwrap()
}

fn tool_error(result: Result<CallToolResult, ServiceError>) -> ErrorData {
    match result {
        Err(ServiceError::McpError(error)) => error,
        other => panic!("expected a JSON-RPC error, got {other:?}"),
    }
}

/// Helper to create a geocoding response with one hit
fn geocoding_hit(name: &str, latitude: f64, longitude: f64, country: &str) -> Value {
    json!({
        "results": [{
            "id": 1,
            "name": name,
            "latitude": latitude,
            "longitude": longitude,
            "country": country,
            "country_code": country
        }],
        "generationtime_ms": 0.5
    })
}

fn current_response(temperature: f64, weather_code: i32) -> Value {
    json!({
        "latitude": 48.86,
        "longitude": 2.35,
        "current": {
            "time": "2024-06-01T12:00",
            "interval": 900,
            "temperature_2m": temperature,
            "relative_humidity_2m": 62,
            "weather_code": weather_code,
            "surface_pressure": 1012.6,
            "wind_speed_10m": 10.0,
            "wind_direction_10m": 240,
            "uv_index": 4.35,
            "apparent_temperature": 14.6,
            "cloud_cover": 48
        }
    })
}

fn daily_response() -> Value {
    json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "daily": {
            "time": ["2024-06-01", "2024-06-02", "2024-06-03"],
            "weather_code": [3, 61, 0],
            "temperature_2m_max": [18.6, 16.2, 21.0],
            "temperature_2m_min": [9.4, 10.5, 11.1],
            "relative_humidity_2m_mean": [71.2, 84.0, 60.5],
            "wind_speed_10m_max": [5.0, 8.2, 3.1],
            "precipitation_probability_max": [10, 80, 0]
        }
    })
}

async fn request_count(mock: &MockServer) -> usize {
    mock.received_requests().await.map_or(0, |requests| requests.len())
}

#[tokio::test]
async fn test_current_weather_for_city() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_hit(
            "Paris", 48.8566, 2.3522, "FR",
        )))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("wind_speed_unit", "ms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response(15.4, 2)))
        .expect(1)
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let result = call_tool(&client, "get_weather", json!({"city": "Paris", "lang": "en"}))
        .await
        .unwrap();

    let text = result_text(&result);
    assert!(text.contains("Paris, FR"), "{text}");
    assert!(text.contains("15°C"), "{text}");
    assert!(text.contains("Partly cloudy"), "{text}");
    assert_ne!(result.is_error, Some(true));
}

#[tokio::test]
async fn test_country_code_is_part_of_geocoding_query() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .and(query_param("name", "Paris,FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_hit(
            "Paris", 48.8566, 2.3522, "France",
        )))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response(15.4, 0)))
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let result = call_tool(
        &client,
        "get_weather",
        json!({"city": "Paris", "countryCode": "FR"}),
    )
    .await
    .unwrap();

    let text = result_text(&result);
    assert!(text.contains("Météo actuelle à Paris, France"), "{text}");
    assert!(text.contains("Ciel dégagé"), "{text}");
}

#[tokio::test]
async fn test_forecast_has_requested_days_in_order() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_hit(
            "London",
            51.5085,
            -0.1257,
            "United Kingdom",
        )))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("forecast_days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_response()))
        .expect(1)
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let result = call_tool(
        &client,
        "get_weather_forecast",
        json!({"city": "London", "days": 3, "lang": "en"}),
    )
    .await
    .unwrap();

    let text = result_text(&result);
    assert!(text.starts_with("📅 **Weather forecast for London, United Kingdom**"));
    assert_eq!(text.split("\n---\n\n").count(), 3);

    let first = text.find("Overcast").unwrap();
    let second = text.find("Light rain").unwrap();
    let third = text.find("Clear sky").unwrap();
    assert!(first < second && second < third, "{text}");
}

#[tokio::test]
async fn test_coordinates_skip_geocoding() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "45.764"))
        .and(query_param("longitude", "4.8357"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response(21.0, 1)))
        .expect(1)
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let result = call_tool(
        &client,
        "get_weather_by_coordinates",
        json!({"latitude": 45.764, "longitude": 4.8357}),
    )
    .await
    .unwrap();

    let text = result_text(&result);
    assert!(text.contains("45.7640, 4.8357"), "{text}");
    assert!(text.contains("21°C"), "{text}");
    assert_eq!(request_count(&mock).await, 1);
}

#[tokio::test]
async fn test_unknown_city_is_internal_error() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"generationtime_ms": 0.3})),
        )
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let error = tool_error(call_tool(&client, "get_weather", json!({"city": "Zzzzztown"})).await);

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(error.data, Some(json!({"kind": "InternalError"})));
    let message = &error.message;
    assert!(message.contains("Ville \"Zzzzztown\" non trouvée"), "{message}");
    assert!(message.starts_with("Erreur lors de l'exécution de l'outil get_weather"));
    // no forecast request after a geocoding miss
    assert_eq!(request_count(&mock).await, 1);
}

#[tokio::test]
async fn test_unknown_tool_makes_no_request() {
    let mock = MockServer::start().await;
    let client = connect(&mock).await;

    let error = tool_error(call_tool(&client, "get_nonexistent", json!({"city": "Paris"})).await);

    assert_eq!(error.code, ErrorCode::METHOD_NOT_FOUND);
    assert_eq!(error.message, "Outil inconnu: get_nonexistent");
    assert_eq!(error.data, Some(json!({"kind": "MethodNotFound"})));
    assert_eq!(request_count(&mock).await, 0);
}

#[tokio::test]
async fn test_invalid_arguments_make_no_request() {
    let mock = MockServer::start().await;
    let client = connect(&mock).await;

    for (tool, arguments) in [
        ("get_weather", json!({})),
        ("get_weather", json!({"city": "Paris", "countryCode": "fr"})),
        ("get_weather", json!({"city": "Paris", "lang": "xx"})),
        ("get_weather_forecast", json!({"city": "Paris", "days": 0})),
        ("get_weather_forecast", json!({"city": "Paris", "days": "three"})),
        (
            "get_weather_by_coordinates",
            json!({"latitude": 0, "longitude": 181}),
        ),
    ] {
        let error = tool_error(call_tool(&client, tool, arguments).await);
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS, "{error:?}");
        assert_eq!(error.data, Some(json!({"kind": "InvalidParams"})));
    }

    assert_eq!(request_count(&mock).await, 0);
}

#[tokio::test]
async fn test_upstream_failure_reports_status() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_hit(
            "Paris", 48.8566, 2.3522, "France",
        )))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let error = tool_error(call_tool(&client, "get_weather", json!({"city": "Paris"})).await);

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    let message = &error.message;
    assert!(message.contains("Erreur API météo"), "{message}");
    assert!(message.contains("503"), "{message}");
}

#[tokio::test]
async fn test_malformed_forecast_is_internal_error() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"latitude": 1.0})))
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let error = tool_error(
        call_tool(
            &client,
            "get_weather_by_coordinates",
            json!({"latitude": 1.0, "longitude": 1.0}),
        )
        .await,
    );

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    assert!(error.message.contains("Réponse météo invalide"), "{error:?}");
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocoding_hit("Paris", 48.8566, 2.3522, "France"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock)
        .await;

    let client = connect_with_timeout(&mock, 500).await;
    let error = tool_error(call_tool(&client, "get_weather", json!({"city": "Paris"})).await);

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    let message = &error.message;
    assert!(message.contains("Erreur de géocodage"), "{message}");
    assert!(message.contains("délai dépassé (500 ms)"), "{message}");
}

#[tokio::test]
async fn test_geocoding_server_error_reports_status() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock)
        .await;

    let client = connect(&mock).await;
    let error = tool_error(call_tool(&client, "get_weather", json!({"city": "Paris"})).await);

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(error.data, Some(json!({"kind": "InternalError"})));
    assert!(
        error.message.contains("Erreur de géocodage: 500"),
        "{}",
        error.message
    );
    // no forecast request after a geocoding failure
    assert_eq!(request_count(&mock).await, 1);
}

#[tokio::test]
async fn test_session_lists_tools() {
    let mock = MockServer::start().await;
    let client = connect(&mock).await;

    let tools = client.list_tools(None).await.unwrap();
    let names: Vec<&str> = tools.tools.iter().map(|tool| &*tool.name).collect();
    assert_eq!(
        names,
        ["get_weather", "get_weather_forecast", "get_weather_by_coordinates"]
    );

    let info = client.peer_info().unwrap();
    assert_eq!(info.server_info.name, "meteo-mcp");

    client.cancel().await.unwrap();
}
