//! Views derived from a raw forecast sequence.
//!
//! All functions are pure and never reorder their input.

use chrono::{NaiveDate, Timelike};
use serde::Serialize;
use std::collections::HashSet;

use crate::model::ForecastPoint;

/// 8 points at a 3-hour cadence.
pub const NEXT_24H_POINTS: usize = 8;
/// 40 points at a 3-hour cadence.
pub const NEXT_5_DAYS_POINTS: usize = 40;
/// UTC hour used to represent a whole day in the 5-day list.
pub const MIDDAY_UTC_HOUR: u32 = 18;

pub fn next_5_days(points: &[ForecastPoint]) -> &[ForecastPoint] {
    &points[..points.len().min(NEXT_5_DAYS_POINTS)]
}

/// Always a prefix of [`next_5_days`].
pub fn next_24h(points: &[ForecastPoint]) -> &[ForecastPoint] {
    let five_days = next_5_days(points);
    &five_days[..five_days.len().min(NEXT_24H_POINTS)]
}

/// One entry per UTC calendar day, taken at [`MIDDAY_UTC_HOUR`].
pub fn midday_by_day(points: &[ForecastPoint]) -> Vec<&ForecastPoint> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    next_5_days(points)
        .iter()
        .filter(|p| p.timestamp.hour() == MIDDAY_UTC_HOUR)
        .filter(|p| seen.insert(p.timestamp.date_naive()))
        .collect()
}

/// A labelled series ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub unit: &'static str,
    pub points: Vec<(String, f64)>,
}

impl ChartSeries {
    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|(_, v)| *v).reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|(_, v)| *v).reduce(f64::min)
    }
}

pub fn temperature_series(points: &[ForecastPoint], unit: &'static str) -> ChartSeries {
    series("Temperature Variation", unit, points, |p| p.temperature)
}

pub fn humidity_series(points: &[ForecastPoint]) -> ChartSeries {
    series("Humidity Levels", "%", points, |p| f64::from(p.humidity_pct))
}

pub fn wind_series(points: &[ForecastPoint], unit: &'static str) -> ChartSeries {
    series("Wind Speed", unit, points, |p| p.wind_speed)
}

fn series(
    title: &'static str,
    unit: &'static str,
    points: &[ForecastPoint],
    value: impl Fn(&ForecastPoint) -> f64,
) -> ChartSeries {
    let points = next_24h(points)
        .iter()
        .map(|p| (time_label(p), value(p)))
        .collect();

    ChartSeries { title, unit, points }
}

/// "15:00" in UTC.
pub fn time_label(point: &ForecastPoint) -> String {
    point.timestamp.format("%H:%M").to_string()
}

/// Row of the 5-day list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    /// "Oct 19"
    pub date: String,
    /// "6:00 PM"
    pub time: String,
    pub temperature: f64,
    pub description: String,
    pub icon_url: String,
}

pub fn daily_entries(points: &[ForecastPoint]) -> Vec<DailyEntry> {
    midday_by_day(points)
        .into_iter()
        .map(|p| DailyEntry {
            date: p.timestamp.format("%b %-d").to_string(),
            time: p.timestamp.format("%-I:%M %p").to_string(),
            temperature: p.temperature,
            description: p.description.clone(),
            icon_url: p.icon_url(),
        })
        .collect()
}
