use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::model::{ForecastRequest, HourlyPayload};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Hourly variables requested from the API, in series order.
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,cloud_cover";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Open-Meteo forecast API. No credentials required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a self-hosted
    /// Open-Meteo instance or a test server.
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self { base_url, http })
    }

    async fn fetch(&self, request: &ForecastRequest) -> Result<HourlyPayload> {
        let url = format!("{}/v1/forecast", self.base_url);

        tracing::debug!(
            latitude = request.latitude,
            longitude = request.longitude,
            forecast_days = request.forecast_days,
            "requesting hourly forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", request.latitude.to_string()),
                ("longitude", request.longitude.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("forecast_days", request.forecast_days.to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (hourly forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: HourlyPayload =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo hourly JSON")?;

        tracing::debug!(hours = parsed.hourly.temperature_2m.len(), "decoded hourly forecast");

        Ok(parsed)
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch_hourly(&self, request: &ForecastRequest) -> Result<HourlyPayload> {
        self.fetch(request).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hourly_body(hours: usize) -> serde_json::Value {
        json!({
            "latitude": 52.52,
            "longitude": 13.42,
            "hourly": {
                "temperature_2m": vec![11.5; hours],
                "relative_humidity_2m": vec![70; hours],
                "cloud_cover": vec![25; hours],
            }
        })
    }

    #[tokio::test]
    async fn fetches_and_decodes_hourly_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("hourly", HOURLY_FIELDS))
            .and(query_param("forecast_days", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(96)))
            .mount(&server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(server.uri()).unwrap();
        let payload = provider
            .fetch_hourly(&ForecastRequest::new(52.52, 13.42))
            .await
            .expect("fetch should succeed");

        assert_eq!(payload.hourly.temperature_2m.len(), 96);
        assert_eq!(payload.hourly.cloud_cover.len(), 96);
    }

    #[tokio::test]
    async fn reports_http_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(server.uri()).unwrap();
        let err = provider.fetch_hourly(&ForecastRequest::new(0.0, 0.0)).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("status 500"));
        assert!(msg.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn reports_unparseable_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(server.uri()).unwrap();
        let err = provider.fetch_hourly(&ForecastRequest::new(0.0, 0.0)).await.unwrap_err();

        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn truncates_long_error_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
    }
}
