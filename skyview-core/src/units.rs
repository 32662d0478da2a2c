//! Unit system handling.
//!
//! The upstream API is always queried in its standard units (Kelvin, m/s).
//! Everything that reaches a [`crate::WeatherSnapshot`] has been converted
//! exactly once, by the functions in this module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query value sent as `units=` on every weather request.
pub const UPSTREAM_UNITS: &str = "standard";

const KELVIN_OFFSET: f64 = 273.15;
const MPS_TO_MPH: f64 = 2.236_936;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Fahrenheit and miles per hour.
    #[default]
    Imperial,
    /// Celsius and meters per second.
    Metric,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Imperial, UnitSystem::Metric]
    }

    pub fn temperature_from_kelvin(&self, kelvin: f64) -> f64 {
        let celsius = kelvin - KELVIN_OFFSET;
        match self {
            UnitSystem::Imperial => celsius * 9.0 / 5.0 + 32.0,
            UnitSystem::Metric => celsius,
        }
    }

    pub fn wind_from_mps(&self, mps: f64) -> f64 {
        match self {
            UnitSystem::Imperial => mps * MPS_TO_MPH,
            UnitSystem::Metric => mps,
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "°F",
            UnitSystem::Metric => "°C",
        }
    }

    pub fn wind_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mph",
            UnitSystem::Metric => "m/s",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: imperial, metric."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn kelvin_to_fahrenheit_at_fixed_points() {
        assert!(close(UnitSystem::Imperial.temperature_from_kelvin(273.15), 32.0));
        assert!(close(UnitSystem::Imperial.temperature_from_kelvin(373.15), 212.0));
        assert!(close(UnitSystem::Imperial.temperature_from_kelvin(233.15), -40.0));
    }

    #[test]
    fn kelvin_to_celsius() {
        assert!(close(UnitSystem::Metric.temperature_from_kelvin(300.0), 26.85));
    }

    #[test]
    fn wind_conversion() {
        assert!(close(UnitSystem::Imperial.wind_from_mps(10.0), 22.36936));
        assert!(close(UnitSystem::Metric.wind_from_mps(10.0), 10.0));
    }

    #[test]
    fn unit_system_roundtrip() {
        for units in UnitSystem::all() {
            let parsed = UnitSystem::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
        assert!(UnitSystem::try_from("kelvin").is_err());
    }

    #[test]
    fn default_is_imperial() {
        assert_eq!(UnitSystem::default(), UnitSystem::Imperial);
    }
}
