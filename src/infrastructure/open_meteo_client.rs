// Open-Meteo forecast provider implementation
use crate::application::forecast_provider::{FetchError, ForecastProvider};
use crate::domain::forecast::ForecastSeries;
use crate::domain::location::Coordinate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://api.open-meteo.com";
const FORECAST_PATH: &str = "/v1/forecast";
const HOURLY_VARIABLES: &str = "temperature_2m,rain";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyData,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    rain: Vec<f64>,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_forecast_url(&self, location: Coordinate) -> String {
        format!(
            "{}{}?latitude={}&longitude={}&hourly={}",
            self.base_url,
            FORECAST_PATH,
            location.latitude(),
            location.longitude(),
            urlencoding::encode(HOURLY_VARIABLES)
        )
    }
}

/// Decode a forecast body into a validated series
fn parse_forecast(body: &str) -> Result<ForecastSeries, FetchError> {
    let data: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Data(format!("failed to parse forecast response: {}", e)))?;

    let hourly = data.hourly;
    Ok(ForecastSeries::from_parallel(
        hourly.time,
        hourly.temperature_2m,
        hourly.rain,
    )?)
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch_forecast(&self, location: Coordinate) -> Result<ForecastSeries, FetchError> {
        let url = self.build_forecast_url(location);
        tracing::debug!("Requesting forecast: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Protocol(format!(
                "forecast request failed with status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_forecast(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hourly_body(hours: usize, rain_len: usize) -> serde_json::Value {
        let time: Vec<String> = (0..hours).map(|h| format!("2024-01-01T{:02}:00", h)).collect();
        serde_json::json!({
            "latitude": 51.1,
            "longitude": 17.03,
            "hourly_units": { "time": "iso8601", "temperature_2m": "°C", "rain": "mm" },
            "hourly": {
                "time": time,
                "temperature_2m": vec![8.5; hours],
                "rain": vec![0.2; rain_len],
            }
        })
    }

    fn client(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_forecast_url() {
        let client =
            OpenMeteoClient::new("http://api.open-meteo.com/", Duration::from_secs(1)).unwrap();
        let url = client.build_forecast_url(Coordinate::default());
        assert_eq!(
            url,
            concat!(
                "http://api.open-meteo.com/v1/forecast",
                "?latitude=51.1&longitude=17.03&hourly=temperature_2m%2Crain"
            )
        );
    }

    #[test]
    fn test_parse_rejects_missing_hourly() {
        let err = parse_forecast(r#"{"latitude": 51.1}"#).unwrap_err();
        assert!(matches!(err, FetchError::Data(_)));
    }

    #[tokio::test]
    async fn test_fetch_forecast_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "51.1"))
            .and(query_param("longitude", "17.03"))
            .and(query_param("hourly", "temperature_2m,rain"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(24, 24)))
            .mount(&server)
            .await;

        let series = client(&server)
            .fetch_forecast(Coordinate::default())
            .await
            .unwrap();

        assert_eq!(series.len(), 24);
        assert_eq!(series.points()[23].timestamp, "2024-01-01T23:00");
        assert_eq!(series.points()[0].temperature_celsius, 8.5);
        assert_eq!(series.points()[0].rainfall_mm, 0.2);
    }

    #[tokio::test]
    async fn test_fetch_forecast_length_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(24, 23)))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_forecast(Coordinate::default())
            .await
            .unwrap_err();

        match err {
            FetchError::Data(message) => assert!(message.contains("rain=23")),
            other => panic!("expected data error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_forecast_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_forecast(Coordinate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_fetch_forecast_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"hourly\": "))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_forecast(Coordinate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Data(_)));
    }

    #[tokio::test]
    async fn test_fetch_forecast_unreachable_host() {
        let client = OpenMeteoClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = client.fetch_forecast(Coordinate::default()).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }
}
