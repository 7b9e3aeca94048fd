#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed rows for the crash dashboard aggregate views.
//!
//! One result type per view, plus the [`DashboardViews`] bundle handed to
//! the rendering collaborator. These types are serialized to JSON for the
//! API and are separate from the record types to allow independent
//! evolution of the output contract.

use crash_map_crash_models::WEEKDAY_NAMES;
use serde::{Deserialize, Serialize};

/// Number of crashes observed in one borough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoroughCount {
    /// Borough name, `"UNKNOWN"` for records without one.
    pub borough: String,
    /// Number of crashes.
    pub crash_count: u64,
}

/// Number of crashes observed in one year-month bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Year-month bucket (e.g. "2021-04").
    pub month: String,
    /// Number of crashes.
    pub crash_count: u64,
}

/// Number of crashes attributed to one contributing factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorCount {
    /// Contributing factor, `"UNKNOWN"` for records without one.
    pub factor: String,
    /// Number of crashes.
    pub crash_count: u64,
}

/// Number of crashes involving one vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeCount {
    /// Vehicle type, `"UNKNOWN"` for records without one.
    pub vehicle_type: String,
    /// Number of crashes.
    pub count: u64,
}

/// One weekday row of the day-by-hour heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRow {
    /// Weekday name.
    pub day: String,
    /// One count per hour column.
    pub counts: Vec<u64>,
}

/// Crash counts pivoted by weekday and hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHourHeatmap {
    /// Hour column labels.
    pub hours: Vec<u8>,
    /// Weekday rows, Monday first.
    pub rows: Vec<HeatmapRow>,
}

impl DayHourHeatmap {
    /// A full 7×24 matrix with every cell zero.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            hours: (0..24).collect(),
            rows: WEEKDAY_NAMES
                .iter()
                .map(|day| HeatmapRow {
                    day: (*day).to_owned(),
                    counts: vec![0; 24],
                })
                .collect(),
        }
    }

    /// The degenerate single-cell zero matrix used when the source has
    /// no weekday or hour concept.
    #[must_use]
    pub fn degenerate() -> Self {
        Self {
            hours: vec![0],
            rows: vec![HeatmapRow {
                day: String::new(),
                counts: vec![0],
            }],
        }
    }

    /// Sum of every cell.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| row.counts.iter().sum::<u64>())
            .sum()
    }
}

/// One sampled crash location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Injured-person totals by road-user category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryBreakdown {
    /// Total pedestrians injured.
    pub pedestrians_injured: u64,
    /// Total cyclists injured.
    pub cyclists_injured: u64,
    /// Total motorists injured.
    pub motorists_injured: u64,
}

/// Injured-versus-killed totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityTotals {
    /// Total persons injured.
    pub persons_injured: u64,
    /// Total persons killed.
    pub persons_killed: u64,
}

/// The eight aggregate views computed from one filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    /// Crashes per borough, descending.
    pub borough_counts: Vec<BoroughCount>,
    /// Crashes per month, chronological.
    pub monthly_trend: Vec<MonthlyCount>,
    /// Top contributing factors, descending, at most 10.
    pub top_factors: Vec<FactorCount>,
    /// Weekday-by-hour crash counts.
    pub day_hour_heatmap: DayHourHeatmap,
    /// Sampled crash coordinates, at most 2000.
    pub geo_sample: Vec<GeoPoint>,
    /// Injured-person totals by category.
    pub injury_breakdown: InjuryBreakdown,
    /// Top vehicle types, descending, at most 15.
    pub vehicle_type_counts: Vec<VehicleTypeCount>,
    /// Injured-versus-killed totals.
    pub severity: SeverityTotals,
}
