//! The eight dashboard views.
//!
//! Every view is a pure function of the filtered subset. Null categorical
//! values are bucketed under [`UNKNOWN_BUCKET`]; descending-count sorts
//! are stable over alphabetical group order, so equal counts appear in a
//! deterministic order. Truncation caps are exact cutoffs.

use std::collections::BTreeMap;

use crash_map_analytics_models::{
    BoroughCount, DashboardViews, DayHourHeatmap, FactorCount, GeoPoint, InjuryBreakdown,
    MonthlyCount, SeverityTotals, VehicleTypeCount,
};
use crash_map_crash_models::{CrashRecord, WEEKDAY_NAMES};
use crash_map_store::SourceColumns;

/// Bucket name for records whose categorical value is null.
pub const UNKNOWN_BUCKET: &str = "UNKNOWN";

/// Maximum rows in the top-factors view.
pub const TOP_FACTORS_LIMIT: usize = 10;

/// Maximum rows in the vehicle-type view.
pub const TOP_VEHICLE_TYPES_LIMIT: usize = 15;

/// Maximum records in the geographic sample.
pub const GEO_SAMPLE_CAP: usize = 2000;

/// Groups records by a categorical key, bucketing nulls under
/// [`UNKNOWN_BUCKET`], and returns `(bucket, count)` rows sorted by
/// descending count.
fn bucket_counts(
    records: &[&CrashRecord],
    key: impl Fn(&CrashRecord) -> Option<&str>,
) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records.iter().copied() {
        let bucket = key(record).unwrap_or(UNKNOWN_BUCKET);
        *counts.entry(bucket.to_owned()).or_insert(0) += 1;
    }

    let mut rows: Vec<(String, u64)> = counts.into_iter().collect();
    // Stable sort: ties keep the alphabetical order of the map.
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Crashes per borough, descending.
#[must_use]
pub fn borough_counts(records: &[&CrashRecord]) -> Vec<BoroughCount> {
    bucket_counts(records, |r| r.borough.as_deref())
        .into_iter()
        .map(|(borough, crash_count)| BoroughCount {
            borough,
            crash_count,
        })
        .collect()
}

/// Crashes per year-month bucket in chronological order. Records without
/// a derivable month are dropped from this view only.
#[must_use]
pub fn monthly_trend(records: &[&CrashRecord]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if let Some(month) = record.crash_month.as_deref() {
            *counts.entry(month).or_insert(0) += 1;
        }
    }

    // "YYYY-MM" keys sort lexicographically in chronological order.
    counts
        .into_iter()
        .map(|(month, crash_count)| MonthlyCount {
            month: month.to_owned(),
            crash_count,
        })
        .collect()
}

/// Top contributing factors, descending, truncated to
/// [`TOP_FACTORS_LIMIT`] rows.
#[must_use]
pub fn top_factors(records: &[&CrashRecord]) -> Vec<FactorCount> {
    let mut rows: Vec<FactorCount> =
        bucket_counts(records, |r| r.contributing_factor_vehicle_1.as_deref())
            .into_iter()
            .map(|(factor, crash_count)| FactorCount {
                factor,
                crash_count,
            })
            .collect();
    rows.truncate(TOP_FACTORS_LIMIT);
    rows
}

/// Crash counts pivoted by weekday and hour.
///
/// Records lacking a derived day or hour contribute to no cell. When the
/// source itself had no date or time column, the weekday/hour concept
/// does not exist and the degenerate single-cell matrix is returned.
#[must_use]
pub fn day_hour_heatmap(records: &[&CrashRecord], columns: &SourceColumns) -> DayHourHeatmap {
    if !columns.date || !columns.time {
        return DayHourHeatmap::degenerate();
    }

    let mut heat = DayHourHeatmap::zeroed();
    for record in records {
        if let (Some(day), Some(hour)) = (record.crash_day.as_deref(), record.crash_hour)
            && let Some(row) = WEEKDAY_NAMES.iter().position(|name| *name == day)
        {
            heat.rows[row].counts[usize::from(hour)] += 1;
        }
    }
    heat
}

/// Records with both coordinates present, truncated to the first
/// [`GEO_SAMPLE_CAP`] in dataset order. Empty when the source had no
/// coordinate columns.
#[must_use]
pub fn geo_sample(records: &[&CrashRecord], columns: &SourceColumns) -> Vec<GeoPoint> {
    if !columns.coordinates {
        return Vec::new();
    }

    records
        .iter()
        .filter_map(|record| match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        })
        .take(GEO_SAMPLE_CAP)
        .collect()
}

/// Injured-person totals by road-user category.
#[must_use]
pub fn injury_breakdown(records: &[&CrashRecord]) -> InjuryBreakdown {
    let mut totals = InjuryBreakdown::default();
    for record in records {
        totals.pedestrians_injured += u64::from(record.pedestrians_injured);
        totals.cyclists_injured += u64::from(record.cyclist_injured);
        totals.motorists_injured += u64::from(record.motorist_injured);
    }
    totals
}

/// Top vehicle types, descending, truncated to
/// [`TOP_VEHICLE_TYPES_LIMIT`] rows.
#[must_use]
pub fn vehicle_type_counts(records: &[&CrashRecord]) -> Vec<VehicleTypeCount> {
    let mut rows: Vec<VehicleTypeCount> =
        bucket_counts(records, |r| r.vehicle_type_code1.as_deref())
            .into_iter()
            .map(|(vehicle_type, count)| VehicleTypeCount {
                vehicle_type,
                count,
            })
            .collect();
    rows.truncate(TOP_VEHICLE_TYPES_LIMIT);
    rows
}

/// Injured-versus-killed totals.
#[must_use]
pub fn severity(records: &[&CrashRecord]) -> SeverityTotals {
    let mut totals = SeverityTotals::default();
    for record in records {
        totals.persons_injured += u64::from(record.persons_injured);
        totals.persons_killed += u64::from(record.persons_killed);
    }
    totals
}

/// Computes all eight views from one filtered subset.
#[must_use]
pub fn compute_dashboard(records: &[&CrashRecord], columns: &SourceColumns) -> DashboardViews {
    log::debug!("Computing dashboard views over {} records", records.len());
    DashboardViews {
        borough_counts: borough_counts(records),
        monthly_trend: monthly_trend(records),
        top_factors: top_factors(records),
        day_hour_heatmap: day_hour_heatmap(records, columns),
        geo_sample: geo_sample(records, columns),
        injury_breakdown: injury_breakdown(records),
        vehicle_type_counts: vehicle_type_counts(records),
        severity: severity(records),
    }
}
