//! In-memory [`WeatherApi`] for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use crate::{
    error::{ApiError, WeatherPart},
    model::LocationCandidate,
    provider::{Condition, CurrentReading, ForecastReading, WeatherApi},
};

/// Kelvin value that converts to exactly 72 °F.
pub const KELVIN_72F: f64 = 295.372_222_222_222_2;

#[derive(Debug, Default)]
pub struct ScriptedApi {
    zips: HashMap<String, LocationCandidate>,
    names: HashMap<String, Vec<LocationCandidate>>,
    geocode_fails: bool,
    failing: HashSet<WeatherPart>,
    empty_conditions: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_york() -> LocationCandidate {
        LocationCandidate {
            name: "New York".into(),
            state: None,
            country: Some("US".into()),
            lat: 40.75,
            lon: -73.99,
        }
    }

    pub fn springfield(state: &str) -> LocationCandidate {
        LocationCandidate {
            name: "Springfield".into(),
            state: Some(state.into()),
            country: Some("US".into()),
            lat: 39.8,
            lon: -89.6,
        }
    }

    pub fn with_zip(mut self, code: &str, location: LocationCandidate) -> Self {
        self.zips.insert(code.into(), location);
        self
    }

    pub fn with_name(mut self, query: &str, locations: Vec<LocationCandidate>) -> Self {
        self.names.insert(query.into(), locations);
        self
    }

    pub fn failing_geocode(mut self) -> Self {
        self.geocode_fails = true;
        self
    }

    pub fn failing(mut self, part: WeatherPart) -> Self {
        self.failing.insert(part);
        self
    }

    pub fn with_empty_conditions(mut self) -> Self {
        self.empty_conditions = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Midnight UTC on the first forecast day.
    pub fn forecast_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, part: WeatherPart, endpoint: &'static str) -> Result<(), ApiError> {
        if self.failing.contains(&part) {
            return Err(server_error(endpoint));
        }
        Ok(())
    }

    fn conditions(&self, main: &str) -> Vec<Condition> {
        if self.empty_conditions {
            return Vec::new();
        }
        vec![Condition {
            main: main.into(),
            description: format!("{} sky", main.to_lowercase()),
            icon: "01d".into(),
        }]
    }
}

fn server_error(endpoint: &'static str) -> ApiError {
    ApiError::Status {
        endpoint,
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".into(),
    }
}

#[async_trait]
impl WeatherApi for ScriptedApi {
    async fn geocode_by_code(&self, code: &str) -> Result<LocationCandidate, ApiError> {
        self.record(format!("zip:{code}"));
        if self.geocode_fails {
            return Err(server_error("zip"));
        }
        self.zips
            .get(code)
            .cloned()
            .ok_or(ApiError::NotFound { endpoint: "zip" })
    }

    async fn geocode_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LocationCandidate>, ApiError> {
        self.record(format!("direct:{query}:{limit}"));
        if self.geocode_fails {
            return Err(server_error("direct"));
        }
        Ok(self.names.get(query).cloned().unwrap_or_default())
    }

    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentReading, ApiError> {
        self.record(format!("current:{lat}:{lon}"));
        self.check(WeatherPart::Current, "weather")?;
        Ok(CurrentReading {
            observed_at: Self::forecast_start(),
            temperature_k: KELVIN_72F,
            feels_like_k: KELVIN_72F,
            humidity_pct: 40,
            wind_mps: 4.4704,
            conditions: self.conditions("Clear"),
        })
    }

    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastReading>, ApiError> {
        self.record(format!("forecast:{lat}:{lon}"));
        self.check(WeatherPart::Forecast, "forecast")?;
        Ok((0..40)
            .map(|i| ForecastReading {
                timestamp: Self::forecast_start() + chrono::Duration::hours(3 * i),
                temperature_k: KELVIN_72F,
                humidity_pct: 50,
                wind_mps: 2.0,
                conditions: self.conditions("Clouds"),
            })
            .collect())
    }

    async fn uv_index(&self, lat: f64, lon: f64) -> Result<f64, ApiError> {
        self.record(format!("uvi:{lat}:{lon}"));
        self.check(WeatherPart::UvIndex, "uvi")?;
        Ok(5.2)
    }
}
