//! End-to-end tests for the dashboard against a mock Open-Meteo server.

use std::sync::Arc;

use dashboard_core::{Config, Dashboard, FetchError, api_from_config};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn place(id: u64, name: &str, country: &str, latitude: f64, longitude: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "latitude": latitude,
        "longitude": longitude,
        "country": country
    })
}

fn dashboard_for(server: &MockServer) -> Arc<Dashboard> {
    let config = Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        ..Config::default()
    };
    let api = api_from_config(&config).expect("client should build");
    Arc::new(Dashboard::new(api, &config))
}

#[tokio::test]
async fn typing_lon_lists_london_and_londonderry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Lon"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                place(1, "London", "UK", 51.5, -0.12),
                place(2, "Londonderry", "UK", 55.0, -7.3),
                place(3, "London", "UK", 51.5, -0.12),
                place(4, "Longyearbyen", "Svalbard", 78.2, 15.6),
                place(5, "East London", "South Africa", -33.0, 27.9)
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dash = dashboard_for(&server);
    let out = dash.set_city("Lon").await;

    let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["London", "Londonderry", "Longyearbyen"]);
    assert!(dash.state().suggestions_visible);
}

#[tokio::test]
async fn one_letter_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dash = dashboard_for(&server);

    assert!(dash.set_city("L").await.is_empty());
    assert!(!dash.state().suggestions_visible);
}

#[tokio::test]
async fn suggestion_server_error_is_silent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let dash = dashboard_for(&server);

    assert!(dash.set_city("Paris").await.is_empty());
    let state = dash.state();
    assert!(!state.suggestions_visible);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn submit_resolves_city_then_fetches_weather() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Tokyo"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [place(1850147, "Tokyo", "Japan", 35.6895, 139.69171)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "35.6895"))
        .and(query_param("longitude", "139.69171"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {
                "time": "2026-10-18T21:00",
                "temperature": 18.2,
                "windspeed": 5.4,
                "winddirection": 45,
                "weathercode": 61,
                "is_day": 0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dash = dashboard_for(&server);
    let result = dash
        .submit_city("Tokyo")
        .await
        .expect("fetch should succeed")
        .expect("city is not empty");

    assert_eq!(result.city, "Tokyo");
    assert_eq!(result.country, "Japan");
    assert_eq!(result.temperature, 18.2);
    assert_eq!(result.weathercode, 61);

    let state = dash.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.weather, Some(result));
}

#[tokio::test]
async fn empty_geocoding_result_is_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dash = dashboard_for(&server);
    let err = dash.submit_city("Nowhereville").await.unwrap_err();

    assert!(matches!(err, FetchError::CityNotFound));
    let state = dash.state();
    assert_eq!(state.error.as_deref(), Some("City not found"));
    assert!(state.weather.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn forecast_outage_is_generic_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [place(1, "Madrid", "Spain", 40.4, -3.7)]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let dash = dashboard_for(&server);
    let err = dash.submit_city("Madrid").await.unwrap_err();

    assert!(err.detail().contains("status 503"));
    let state = dash.state();
    assert_eq!(state.error.as_deref(), Some("City not found or API error"));
    assert!(state.weather.is_none());
    assert!(!state.loading);
}
