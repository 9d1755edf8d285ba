use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Config,
    model::{CurrentWeather, GeoMatch},
};

use super::WeatherApi;

/// Open-Meteo geocoding + forecast client. Both endpoints are keyless.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    geocoding_url: Url,
    forecast_url: Url,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(geocoding_url: Url, forecast_url: Url, http: Client) -> Self {
        Self {
            geocoding_url,
            forecast_url,
            http,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoding_url = Url::parse(&config.geocoding_url)
            .with_context(|| format!("Invalid geocoding URL: {}", config.geocoding_url))?;
        let forecast_url = Url::parse(&config.forecast_url)
            .with_context(|| format!("Invalid forecast URL: {}", config.forecast_url))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self::new(geocoding_url, forecast_url, http))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let res = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send {what} request to Open-Meteo"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse Open-Meteo {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    /// Absent (not empty) when nothing matched.
    #[serde(default)]
    results: Option<Vec<GeoMatch>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[async_trait]
impl WeatherApi for OpenMeteoClient {
    async fn geocode(&self, name: &str, count: u32) -> Result<Vec<GeoMatch>> {
        let count = count.to_string();
        let parsed: GeocodingResponse = self
            .get_json(
                &self.geocoding_url,
                &[("name", name), ("count", count.as_str())],
                "geocoding",
            )
            .await?;

        Ok(parsed.results.unwrap_or_default())
    }

    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let parsed: ForecastResponse = self
            .get_json(
                &self.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current_weather", "true"),
                ],
                "forecast",
            )
            .await?;

        Ok(parsed.current_weather)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
