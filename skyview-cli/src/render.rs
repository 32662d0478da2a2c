//! Plain-text rendering of a weather snapshot.

use std::fmt::Write;

use skyview_core::{WeatherSnapshot, projection};

const BAR_WIDTH: usize = 30;

/// Full dashboard: current card, highlights with charts, 5-day list.
pub fn dashboard(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();
    current_card(&mut out, snapshot);
    out.push('\n');
    highlights(&mut out, snapshot);
    out.push('\n');
    five_day(&mut out, snapshot);
    out
}

fn current_card(out: &mut String, snapshot: &WeatherSnapshot) {
    let current = &snapshot.current;
    let temp_unit = snapshot.units.temperature_symbol();

    let _ = writeln!(out, "{}", snapshot.location.display_name());
    let _ = writeln!(
        out,
        "  {:.0}{temp_unit}  {}  (feels like {:.0}{temp_unit})",
        current.temperature, current.description, current.feels_like
    );
    let _ = writeln!(out, "  {}", current.icon_url());
}

fn highlights(out: &mut String, snapshot: &WeatherSnapshot) {
    let current = &snapshot.current;
    let units = snapshot.units;

    let _ = writeln!(out, "Today's Highlights");
    let _ = writeln!(out, "  UV Index: {} ({})", snapshot.uv, snapshot.uv.risk().as_str());
    let _ = writeln!(
        out,
        "  Wind Speed: {:.1} {}",
        current.wind_speed,
        units.wind_symbol()
    );
    let _ = writeln!(out, "  Humidity: {}%", current.humidity_pct);

    let next = snapshot.next_24h();
    for series in [
        projection::temperature_series(next, units.temperature_symbol()),
        projection::wind_series(next, units.wind_symbol()),
        projection::humidity_series(next),
    ] {
        out.push('\n');
        chart(out, &series);
    }
}

fn chart(out: &mut String, series: &projection::ChartSeries) {
    let _ = writeln!(out, "{} ({})", series.title, series.unit);

    let (Some(min), Some(max)) = (series.min(), series.max()) else {
        let _ = writeln!(out, "  no data");
        return;
    };

    for (label, value) in &series.points {
        let _ = writeln!(
            out,
            "  {label} {:<width$} {value:.1}",
            bar(*value, min, max),
            width = BAR_WIDTH
        );
    }
}

/// At least one block so every row is visible.
fn bar(value: f64, min: f64, max: f64) -> String {
    let len = if max > min {
        1 + ((value - min) / (max - min) * (BAR_WIDTH - 1) as f64).round() as usize
    } else {
        BAR_WIDTH / 2
    };
    "█".repeat(len.min(BAR_WIDTH))
}

fn five_day(out: &mut String, snapshot: &WeatherSnapshot) {
    let _ = writeln!(out, "5-Day Forecast");

    let entries = projection::daily_entries(&snapshot.forecast);
    if entries.is_empty() {
        let _ = writeln!(out, "  no forecast available");
        return;
    }

    let temp_unit = snapshot.units.temperature_symbol();
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<7} {:>8}  {:>4.0}{temp_unit}  {}",
            entry.date, entry.time, entry.temperature, entry.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use skyview_core::{
        CurrentConditions, ForecastPoint, LocationCandidate, UnitSystem, UvIndex,
    };

    fn snapshot(points: usize) -> WeatherSnapshot {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        WeatherSnapshot {
            location: LocationCandidate {
                name: "Springfield".into(),
                state: Some("Illinois".into()),
                country: Some("US".into()),
                lat: 39.8,
                lon: -89.64,
            },
            current: CurrentConditions {
                temperature: 71.6,
                feels_like: 70.2,
                humidity_pct: 64,
                wind_speed: 10.0,
                description: "light rain".into(),
                icon_id: "10d".into(),
                condition_category: "rain".into(),
                observed_at: start,
            },
            uv: UvIndex::new(6.4),
            units: UnitSystem::Imperial,
            forecast: (0..points)
                .map(|i| ForecastPoint {
                    timestamp: start + Duration::hours(3 * i as i64),
                    temperature: 60.0 + i as f64,
                    humidity_pct: 50,
                    wind_speed: 5.0,
                    icon_id: "04d".into(),
                    description: "broken clouds".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn dashboard_has_all_sections() {
        let text = dashboard(&snapshot(40));

        assert!(text.starts_with("Springfield, Illinois\n"));
        assert!(text.contains("72°F  light rain  (feels like 70°F)"));
        assert!(text.contains("UV Index: 6.4 (high)"));
        assert!(text.contains("Wind Speed: 10.0 mph"));
        assert!(text.contains("Humidity: 64%"));
        assert!(text.contains("Temperature Variation (°F)"));
        assert!(text.contains("Humidity Levels (%)"));
        assert!(text.contains("5-Day Forecast"));
        assert!(text.contains("Jul 5"));
    }

    #[test]
    fn empty_forecast_is_reported() {
        let text = dashboard(&snapshot(0));
        assert!(text.contains("no data"));
        assert!(text.contains("no forecast available"));
    }

    #[test]
    fn bars_scale_between_extremes() {
        assert_eq!(bar(0.0, 0.0, 10.0).chars().count(), 1);
        assert_eq!(bar(10.0, 0.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 5.0, 5.0).chars().count(), BAR_WIDTH / 2);
    }
}
