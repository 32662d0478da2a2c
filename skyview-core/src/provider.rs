use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::{Config, error::ApiError, model::LocationCandidate};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Weather label as reported upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Primary group, e.g. "Rain".
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Current conditions in upstream standard units (Kelvin, m/s).
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReading {
    pub observed_at: DateTime<Utc>,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub humidity_pct: u8,
    pub wind_mps: f64,
    pub conditions: Vec<Condition>,
}

/// One forecast step in upstream standard units (Kelvin, m/s).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReading {
    pub timestamp: DateTime<Utc>,
    pub temperature_k: f64,
    pub humidity_pct: u8,
    pub wind_mps: f64,
    pub conditions: Vec<Condition>,
}

/// Calls the resolver and aggregator need from the weather service.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Fails with [`ApiError::NotFound`] when the code is unknown.
    async fn geocode_by_code(&self, code: &str) -> Result<LocationCandidate, ApiError>;

    async fn geocode_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LocationCandidate>, ApiError>;

    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentReading, ApiError>;

    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastReading>, ApiError>;

    async fn uv_index(&self, lat: f64, lon: f64) -> Result<f64, ApiError>;
}

/// Construct the API client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key()?;

    OpenWeatherClient::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()
}
