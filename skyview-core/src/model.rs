use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{projection, units::UnitSystem};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A place the user might have meant, as returned by geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl LocationCandidate {
    /// "Springfield, Illinois", or just the name when no state is known.
    pub fn display_name(&self) -> String {
        match self.state.as_deref() {
            Some(state) if !state.is_empty() => format!("{}, {}", self.name, state),
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for LocationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())?;
        if let Some(country) = &self.country {
            write!(f, " ({country})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon_id: String,
    /// Lower-cased primary weather label ("clear", "rain", ...).
    pub condition_category: String,
    pub observed_at: DateTime<Utc>,
}

impl CurrentConditions {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub icon_id: String,
    pub description: String,
}

impl ForecastPoint {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UvIndex(f64);

impl UvIndex {
    /// Negative readings are clamped to zero.
    pub fn new(value: f64) -> Self {
        Self(value.max(0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn risk(&self) -> UvRisk {
        match self.0 {
            v if v < 3.0 => UvRisk::Low,
            v if v < 6.0 => UvRisk::Moderate,
            v if v < 8.0 => UvRisk::High,
            v if v < 11.0 => UvRisk::VeryHigh,
            _ => UvRisk::Extreme,
        }
    }
}

impl fmt::Display for UvIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            UvRisk::Low => "low",
            UvRisk::Moderate => "moderate",
            UvRisk::High => "high",
            UvRisk::VeryHigh => "very high",
            UvRisk::Extreme => "extreme",
        }
    }
}

/// Everything shown for one location at one point in time.
///
/// Only the raw forecast is stored. The 24-hour, 5-day and midday views are
/// derived on every call so they always agree with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: LocationCandidate,
    pub current: CurrentConditions,
    pub uv: UvIndex,
    pub units: UnitSystem,
    pub forecast: Vec<ForecastPoint>,
}

impl WeatherSnapshot {
    pub fn next_24h(&self) -> &[ForecastPoint] {
        projection::next_24h(&self.forecast)
    }

    pub fn next_5_days(&self) -> &[ForecastPoint] {
        projection::next_5_days(&self.forecast)
    }

    pub fn midday_by_day(&self) -> Vec<&ForecastPoint> {
        projection::midday_by_day(&self.forecast)
    }

    /// Serializable view with the derived sequences materialized.
    pub fn view(&self) -> SnapshotView<'_> {
        SnapshotView {
            location: &self.location,
            current: &self.current,
            uv_index: self.uv,
            uv_risk: self.uv.risk(),
            units: self.units,
            next_24h: self.next_24h(),
            next_5_days: self.next_5_days(),
            midday_by_day: self.midday_by_day(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotView<'a> {
    pub location: &'a LocationCandidate,
    pub current: &'a CurrentConditions,
    pub uv_index: UvIndex,
    pub uv_risk: UvRisk,
    pub units: UnitSystem,
    pub next_24h: &'a [ForecastPoint],
    pub next_5_days: &'a [ForecastPoint],
    pub midday_by_day: Vec<&'a ForecastPoint>,
}

fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}@2x.png")
}
