#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crash record and injury classification types.
//!
//! This crate defines the canonical record type for one observed crash
//! event, along with the fixed injury classification used to restrict
//! queries to crashes that injured a particular kind of road user. All
//! other crates operate on these shared types.

use chrono::{Datelike as _, NaiveDate, NaiveTime, Timelike as _};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Weekday row labels in Monday-first order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Returns the English name for a weekday.
#[must_use]
pub fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Injury classification for query filtering.
///
/// `Total` places no constraint; the other variants restrict results to
/// crashes where at least one person of that category was injured.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum InjuryClass {
    /// All crashes, regardless of injuries.
    #[default]
    Total,
    /// Crashes with at least one injured pedestrian.
    Pedestrian,
    /// Crashes with at least one injured cyclist.
    Cyclist,
    /// Crashes with at least one injured motorist.
    Motorist,
}

impl InjuryClass {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Total, Self::Pedestrian, Self::Cyclist, Self::Motorist]
    }
}

/// One observed crash event.
///
/// Raw attributes mirror the source schema; the `crash_day`, `crash_hour`
/// and `crash_month` fields are derived once at load time via
/// [`CrashRecord::with_derived`] and are `None` whenever the underlying
/// date or time was missing or unparseable.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrashRecord {
    /// Administrative region of the crash.
    pub borough: Option<String>,
    /// Calendar date of the crash.
    pub crash_date: Option<NaiveDate>,
    /// Local time of the crash.
    pub crash_time: Option<NaiveTime>,
    /// Calendar year of the crash, `None` when the source cell was
    /// empty or unparseable.
    pub crash_year: Option<i32>,
    /// Type of the first vehicle involved.
    pub vehicle_type_code1: Option<String>,
    /// Contributing factor attributed to the first vehicle.
    pub contributing_factor_vehicle_1: Option<String>,
    /// Latitude of the crash location.
    pub latitude: Option<f64>,
    /// Longitude of the crash location.
    pub longitude: Option<f64>,
    /// Number of pedestrians injured.
    pub pedestrians_injured: u32,
    /// Number of cyclists injured.
    pub cyclist_injured: u32,
    /// Number of motorists injured.
    pub motorist_injured: u32,
    /// Total persons injured.
    pub persons_injured: u32,
    /// Total persons killed.
    pub persons_killed: u32,
    /// Derived weekday name (e.g. "Monday").
    pub crash_day: Option<String>,
    /// Derived hour of day (0-23).
    pub crash_hour: Option<u8>,
    /// Derived year-month bucket (e.g. "2021-04").
    pub crash_month: Option<String>,
}

impl CrashRecord {
    /// Fills the derived `crash_day`, `crash_hour` and `crash_month`
    /// fields from `crash_date` and `crash_time`. Missing date or time
    /// leaves the corresponding derived fields `None`.
    #[must_use]
    pub fn with_derived(mut self) -> Self {
        self.crash_day = self
            .crash_date
            .map(|d| weekday_name(d.weekday()).to_owned());
        self.crash_month = self
            .crash_date
            .map(|d| format!("{:04}-{:02}", d.year(), d.month()));
        self.crash_hour = self.crash_time.and_then(|t| u8::try_from(t.hour()).ok());
        self
    }

    /// Returns `true` if both coordinates are present.
    #[must_use]
    pub const fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_cover_the_week() {
        assert_eq!(weekday_name(chrono::Weekday::Mon), "Monday");
        assert_eq!(weekday_name(chrono::Weekday::Sun), "Sunday");
    }

    #[test]
    fn derives_day_hour_and_month() {
        let record = CrashRecord {
            // 2021-04-14 was a Wednesday
            crash_date: NaiveDate::from_ymd_opt(2021, 4, 14),
            crash_time: NaiveTime::from_hms_opt(17, 30, 0),
            ..CrashRecord::default()
        }
        .with_derived();

        assert_eq!(record.crash_day.as_deref(), Some("Wednesday"));
        assert_eq!(record.crash_hour, Some(17));
        assert_eq!(record.crash_month.as_deref(), Some("2021-04"));
    }

    #[test]
    fn missing_date_and_time_leave_derived_fields_null() {
        let record = CrashRecord::default().with_derived();
        assert_eq!(record.crash_day, None);
        assert_eq!(record.crash_hour, None);
        assert_eq!(record.crash_month, None);
    }

    #[test]
    fn missing_time_only_nulls_the_hour() {
        let record = CrashRecord {
            crash_date: NaiveDate::from_ymd_opt(2022, 12, 31),
            ..CrashRecord::default()
        }
        .with_derived();

        assert_eq!(record.crash_day.as_deref(), Some("Saturday"));
        assert_eq!(record.crash_month.as_deref(), Some("2022-12"));
        assert_eq!(record.crash_hour, None);
    }

    #[test]
    fn injury_class_string_roundtrip() {
        for class in InjuryClass::all() {
            let parsed: InjuryClass = class.to_string().parse().unwrap();
            assert_eq!(parsed, *class);
        }
        assert_eq!(InjuryClass::default(), InjuryClass::Total);
    }
}
