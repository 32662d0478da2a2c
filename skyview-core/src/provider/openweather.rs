use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::ApiError,
    model::LocationCandidate,
    provider::{Condition, CurrentReading, ForecastReading, WeatherApi},
    units::UPSTREAM_UNITS,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const GEO_ZIP: &str = "geo/1.0/zip";
const GEO_DIRECT: &str = "geo/1.0/direct";
const CURRENT: &str = "data/2.5/weather";
const FORECAST: &str = "data/2.5/forecast";
const UV_INDEX: &str = "data/2.5/uvi";

/// OpenWeather client. The API key is passed through as `appid` untouched.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<OpenWeatherClient> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(OpenWeatherClient {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl OpenWeatherClient {
    pub fn builder(api_key: String) -> OpenWeatherClientBuilder {
        OpenWeatherClientBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(endpoint, ?params, "GET");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        if !status.is_success() {
            tracing::warn!(endpoint, %status, "upstream request failed");
            return Err(ApiError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

fn coords(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
    vec![("lat", lat.to_string()), ("lon", lon.to_string())]
}

fn weather_params(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
    let mut params = coords(lat, lon);
    params.push(("units", UPSTREAM_UNITS.to_string()));
    params
}

#[derive(Debug, Deserialize)]
struct OwGeoLocation {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

impl From<OwGeoLocation> for LocationCandidate {
    fn from(loc: OwGeoLocation) -> Self {
        LocationCandidate {
            name: loc.name,
            state: loc.state,
            country: loc.country,
            lat: loc.lat,
            lon: loc.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

impl From<OwWeather> for Condition {
    fn from(w: OwWeather) -> Self {
        Condition {
            main: w.main,
            description: w.description,
            icon: w.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(with = "chrono::serde::ts_seconds")]
    dt: DateTime<Utc>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    #[serde(with = "chrono::serde::ts_seconds")]
    dt: DateTime<Utc>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwUvResponse {
    value: f64,
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn geocode_by_code(&self, code: &str) -> Result<LocationCandidate, ApiError> {
        let result = self
            .get_json::<OwGeoLocation>(GEO_ZIP, &[("zip", code.to_string())])
            .await;

        match result {
            Ok(loc) => Ok(loc.into()),
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound { endpoint: GEO_ZIP })
            }
            Err(e) => Err(e),
        }
    }

    async fn geocode_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LocationCandidate>, ApiError> {
        let locations: Vec<OwGeoLocation> = self
            .get_json(
                GEO_DIRECT,
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(locations.into_iter().map(Into::into).collect())
    }

    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentReading, ApiError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT, &weather_params(lat, lon)).await?;

        Ok(CurrentReading {
            observed_at: parsed.dt,
            temperature_k: parsed.main.temp,
            feels_like_k: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_mps: parsed.wind.speed,
            conditions: parsed.weather.into_iter().map(Into::into).collect(),
        })
    }

    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastReading>, ApiError> {
        let parsed: OwForecastResponse =
            self.get_json(FORECAST, &weather_params(lat, lon)).await?;

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| ForecastReading {
                timestamp: entry.dt,
                temperature_k: entry.main.temp,
                humidity_pct: entry.main.humidity,
                wind_mps: entry.wind.speed,
                conditions: entry.weather.into_iter().map(Into::into).collect(),
            })
            .collect())
    }

    async fn uv_index(&self, lat: f64, lon: f64) -> Result<f64, ApiError> {
        let parsed: OwUvResponse = self.get_json(UV_INDEX, &coords(lat, lon)).await?;
        Ok(parsed.value)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let client = OpenWeatherClient::builder("KEY".into())
            .base_url("http://localhost:1234/")
            .build()
            .expect("client should build");
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[test]
    fn geo_location_without_state_parses() {
        let loc: OwGeoLocation = serde_json::from_str(
            r#"{"zip":"10001","name":"New York","lat":40.75,"lon":-73.99,"country":"US"}"#,
        )
        .expect("zip payload should parse");
        let candidate = LocationCandidate::from(loc);
        assert_eq!(candidate.name, "New York");
        assert_eq!(candidate.state, None);
        assert_eq!(candidate.country.as_deref(), Some("US"));
    }
}
