//! Combines the three weather lookups for one location into a snapshot.

use crate::{
    error::{AggregationError, WeatherPart},
    model::{CurrentConditions, ForecastPoint, LocationCandidate, UvIndex, WeatherSnapshot},
    provider::{CurrentReading, ForecastReading, WeatherApi},
    units::UnitSystem,
};

/// Fetch current conditions, forecast and UV index for `location`.
///
/// The three lookups run concurrently. If any of them fails nothing is
/// returned; a snapshot is only ever built from a complete set of results.
pub async fn fetch<A>(
    api: &A,
    location: &LocationCandidate,
    units: UnitSystem,
) -> Result<WeatherSnapshot, AggregationError>
where
    A: WeatherApi + ?Sized,
{
    let (lat, lon) = (location.lat, location.lon);
    tracing::debug!(location = %location, lat, lon, "fetching weather");

    let (current, forecast, uv) = tokio::try_join!(
        async {
            api.current(lat, lon).await.map_err(|source| AggregationError::Fetch {
                part: WeatherPart::Current,
                source,
            })
        },
        async {
            api.forecast(lat, lon).await.map_err(|source| AggregationError::Fetch {
                part: WeatherPart::Forecast,
                source,
            })
        },
        async {
            api.uv_index(lat, lon).await.map_err(|source| AggregationError::Fetch {
                part: WeatherPart::UvIndex,
                source,
            })
        },
    )
    .inspect_err(|e| tracing::warn!(location = %location, error = %e, "weather fetch failed"))?;

    let snapshot = WeatherSnapshot {
        location: location.clone(),
        current: convert_current(current, units)?,
        uv: UvIndex::new(uv),
        units,
        forecast: forecast
            .into_iter()
            .map(|reading| convert_forecast(reading, units))
            .collect(),
    };

    tracing::info!(
        location = %snapshot.location,
        category = %snapshot.current.condition_category,
        points = snapshot.forecast.len(),
        "weather snapshot ready"
    );
    Ok(snapshot)
}

fn convert_current(
    reading: CurrentReading,
    units: UnitSystem,
) -> Result<CurrentConditions, AggregationError> {
    let primary = reading
        .conditions
        .into_iter()
        .next()
        .ok_or_else(|| AggregationError::Malformed {
            part: WeatherPart::Current,
            reason: "no weather entries".into(),
        })?;

    Ok(CurrentConditions {
        temperature: units.temperature_from_kelvin(reading.temperature_k),
        feels_like: units.temperature_from_kelvin(reading.feels_like_k),
        humidity_pct: reading.humidity_pct,
        wind_speed: units.wind_from_mps(reading.wind_mps),
        description: primary.description,
        icon_id: primary.icon,
        condition_category: primary.main.to_lowercase(),
        observed_at: reading.observed_at,
    })
}

fn convert_forecast(reading: ForecastReading, units: UnitSystem) -> ForecastPoint {
    let (icon_id, description) = reading
        .conditions
        .into_iter()
        .next()
        .map(|c| (c.icon, c.description))
        .unwrap_or_default();

    ForecastPoint {
        timestamp: reading.timestamp,
        temperature: units.temperature_from_kelvin(reading.temperature_k),
        humidity_pct: reading.humidity_pct,
        wind_speed: units.wind_from_mps(reading.wind_mps),
        icon_id,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedApi;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[tokio::test]
    async fn fetch_builds_complete_snapshot() {
        let api = ScriptedApi::new();
        let location = ScriptedApi::new_york();

        let snapshot = fetch(&api, &location, UnitSystem::Imperial)
            .await
            .expect("fetch should succeed");

        assert_eq!(snapshot.location, location);
        assert!(close(snapshot.current.temperature, 72.0));
        assert!(close(snapshot.current.wind_speed, 10.0));
        assert_eq!(snapshot.current.condition_category, "clear");
        assert_eq!(snapshot.current.description, "clear sky");
        assert_eq!(snapshot.uv.value(), 5.2);
        assert_eq!(snapshot.forecast.len(), 40);
        assert_eq!(snapshot.next_24h().len(), 8);
        assert_eq!(snapshot.midday_by_day().len(), 5);

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec!["current:40.75:-73.99", "forecast:40.75:-73.99", "uvi:40.75:-73.99"]
        );
    }

    #[tokio::test]
    async fn metric_snapshot_uses_celsius_throughout() {
        let api = ScriptedApi::new();

        let snapshot = fetch(&api, &ScriptedApi::new_york(), UnitSystem::Metric)
            .await
            .expect("fetch should succeed");

        assert_eq!(snapshot.units, UnitSystem::Metric);
        assert!(close(snapshot.current.temperature, 22.222_222_222));
        assert!(snapshot
            .forecast
            .iter()
            .all(|p| close(p.temperature, snapshot.current.temperature)));
    }

    #[tokio::test]
    async fn any_failed_part_fails_the_whole_fetch() {
        for part in [WeatherPart::Current, WeatherPart::Forecast, WeatherPart::UvIndex] {
            let api = ScriptedApi::new().failing(part);

            let err = fetch(&api, &ScriptedApi::new_york(), UnitSystem::Imperial)
                .await
                .unwrap_err();
            assert_eq!(err.part(), part);
        }
    }

    #[tokio::test]
    async fn current_without_conditions_is_malformed() {
        let api = ScriptedApi::new().with_empty_conditions();

        let err = fetch(&api, &ScriptedApi::new_york(), UnitSystem::Imperial)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AggregationError::Malformed {
                part: WeatherPart::Current,
                ..
            }
        ));
    }
}
