//! Core library for the `skyview` weather dashboard.
//!
//! This crate defines:
//! - Location resolution (city name or ZIP code to coordinates)
//! - Weather aggregation (current conditions, forecast, UV index)
//! - Derived forecast views and chart series
//! - The dashboard state machine and the controller driving it
//! - Configuration & credentials handling
//!
//! It is used by `skyview-cli`, but can also be reused by other front ends.

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod projection;
pub mod provider;
pub mod resolver;
pub mod state;
pub mod units;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use dashboard::{Dashboard, Submission};
pub use error::{AggregationError, ApiError, DashboardError, ResolutionError};
pub use model::{CurrentConditions, ForecastPoint, LocationCandidate, UvIndex, WeatherSnapshot};
pub use provider::{OpenWeatherClient, WeatherApi};
pub use state::DashboardState;
pub use units::UnitSystem;
