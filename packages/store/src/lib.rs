#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Immutable in-memory crash data store.
//!
//! Loads the tabular crash export once at startup into a fully-derived,
//! strongly-typed record collection plus precomputed categorical domains.
//! After construction nothing mutates the store; queries only read it, so
//! it can be shared across workers behind an `Arc` with no locking.

pub mod parse;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crash_map_crash_models::CrashRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns that must be present in the source header.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "crash_year",
    "borough",
    "vehicle_type_code1",
    "contributing_factor_vehicle_1",
    "number_of_pedestrians_injured",
    "number_of_cyclist_injured",
    "number_of_motorist_injured",
    "number_of_persons_injured",
    "number_of_persons_killed",
];

/// Errors that can occur while loading crash data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read or parsed as CSV.
    #[error("Failed to read crash data: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the source header.
    #[error("Missing required column '{column}' in crash data header")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },
}

/// Which optional columns were present in the source header.
///
/// Absence degrades specific aggregate views instead of failing the load:
/// no date or time column means no weekday/hour concept for the heatmap,
/// no coordinate columns means an empty geographic sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceColumns {
    /// `crash_date` was present.
    pub date: bool,
    /// `crash_time` was present.
    pub time: bool,
    /// Both `latitude` and `longitude` were present.
    pub coordinates: bool,
}

impl SourceColumns {
    /// All optional columns present.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            date: true,
            time: true,
            coordinates: true,
        }
    }
}

/// Sorted, deduplicated, non-null observed values for each categorical
/// dimension, computed once from the full dataset.
///
/// Used to populate selection options and to drive search keyword
/// matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalDomains {
    /// Observed borough names.
    pub boroughs: Vec<String>,
    /// Observed crash years.
    pub years: Vec<i32>,
    /// Observed vehicle types.
    pub vehicle_types: Vec<String>,
    /// Observed contributing factors.
    pub factors: Vec<String>,
}

impl CategoricalDomains {
    /// Computes the domains from a record collection.
    #[must_use]
    pub fn from_records(records: &[CrashRecord]) -> Self {
        let mut boroughs = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut vehicle_types = BTreeSet::new();
        let mut factors = BTreeSet::new();

        for record in records {
            if let Some(b) = &record.borough {
                boroughs.insert(b.clone());
            }
            if let Some(y) = record.crash_year {
                years.insert(y);
            }
            if let Some(v) = &record.vehicle_type_code1 {
                vehicle_types.insert(v.clone());
            }
            if let Some(f) = &record.contributing_factor_vehicle_1 {
                factors.insert(f.clone());
            }
        }

        Self {
            boroughs: boroughs.into_iter().collect(),
            years: years.into_iter().collect(),
            vehicle_types: vehicle_types.into_iter().collect(),
            factors: factors.into_iter().collect(),
        }
    }
}

/// Resolved header positions for the source columns.
struct ColumnIndices {
    crash_date: Option<usize>,
    crash_time: Option<usize>,
    crash_year: usize,
    borough: usize,
    vehicle_type: usize,
    factor: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
    pedestrians_injured: usize,
    cyclist_injured: usize,
    motorist_injured: usize,
    persons_injured: usize,
    persons_killed: usize,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn { column: name });

        Ok(Self {
            crash_date: find("crash_date"),
            crash_time: find("crash_time"),
            crash_year: require("crash_year")?,
            borough: require("borough")?,
            vehicle_type: require("vehicle_type_code1")?,
            factor: require("contributing_factor_vehicle_1")?,
            latitude: find("latitude"),
            longitude: find("longitude"),
            pedestrians_injured: require("number_of_pedestrians_injured")?,
            cyclist_injured: require("number_of_cyclist_injured")?,
            motorist_injured: require("number_of_motorist_injured")?,
            persons_injured: require("number_of_persons_injured")?,
            persons_killed: require("number_of_persons_killed")?,
        })
    }

    const fn source_columns(&self) -> SourceColumns {
        SourceColumns {
            date: self.crash_date.is_some(),
            time: self.crash_time.is_some(),
            coordinates: self.latitude.is_some() && self.longitude.is_some(),
        }
    }
}

/// The immutable, fully-derived record collection and its precomputed
/// categorical domains.
#[derive(Debug, Clone)]
pub struct DataStore {
    records: Vec<CrashRecord>,
    domains: CategoricalDomains,
    columns: SourceColumns,
}

impl DataStore {
    /// Loads crash data from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file is missing or unreadable, or if
    /// a required column is absent from the header. Per-record date/time
    /// parse failures are not errors; they null the derived fields only.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("Loading crash data from {}", path.display());
        Self::from_csv(csv::ReaderBuilder::new().from_path(path)?)
    }

    /// Loads crash data from any CSV byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] under the same conditions as [`Self::load`].
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Self::from_csv(csv::ReaderBuilder::new().from_reader(reader))
    }

    /// Builds a store directly from records, for tests and alternative
    /// loaders. Domains are computed here.
    #[must_use]
    pub fn from_records(records: Vec<CrashRecord>, columns: SourceColumns) -> Self {
        let domains = CategoricalDomains::from_records(&records);
        Self {
            records,
            domains,
            columns,
        }
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, LoadError> {
        let headers = reader.headers()?.clone();
        let indices = ColumnIndices::resolve(&headers)?;
        let columns = indices.source_columns();

        let mut records = Vec::new();
        for row in reader.records() {
            records.push(record_from_row(&row?, &indices));
        }

        let domains = CategoricalDomains::from_records(&records);
        log::info!(
            "Loaded {} crash records ({} boroughs, {} years, {} vehicle types, {} factors)",
            records.len(),
            domains.boroughs.len(),
            domains.years.len(),
            domains.vehicle_types.len(),
            domains.factors.len(),
        );

        Ok(Self {
            records,
            domains,
            columns,
        })
    }

    /// The full record collection, in source order.
    #[must_use]
    pub fn records(&self) -> &[CrashRecord] {
        &self.records
    }

    /// The precomputed categorical domains.
    #[must_use]
    pub const fn domains(&self) -> &CategoricalDomains {
        &self.domains
    }

    /// Which optional source columns were present.
    #[must_use]
    pub const fn columns(&self) -> &SourceColumns {
        &self.columns
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn record_from_row(row: &csv::StringRecord, indices: &ColumnIndices) -> CrashRecord {
    let cell = |idx: usize| row.get(idx).map(str::trim).filter(|s| !s.is_empty());
    let optional_cell = |idx: Option<usize>| idx.and_then(|i| cell(i));

    let crash_date = optional_cell(indices.crash_date).and_then(parse::parse_date);
    let crash_time = optional_cell(indices.crash_time).and_then(parse::parse_time);

    CrashRecord {
        borough: cell(indices.borough).map(str::to_owned),
        crash_date,
        crash_time,
        crash_year: cell(indices.crash_year)
            .and_then(parse::parse_int)
            .and_then(|y| i32::try_from(y).ok()),
        vehicle_type_code1: cell(indices.vehicle_type).map(str::to_owned),
        contributing_factor_vehicle_1: cell(indices.factor).map(str::to_owned),
        latitude: optional_cell(indices.latitude).and_then(parse::parse_coord),
        longitude: optional_cell(indices.longitude).and_then(parse::parse_coord),
        pedestrians_injured: parse::parse_count(cell(indices.pedestrians_injured)),
        cyclist_injured: parse::parse_count(cell(indices.cyclist_injured)),
        motorist_injured: parse::parse_count(cell(indices.motorist_injured)),
        persons_injured: parse::parse_count(cell(indices.persons_injured)),
        persons_killed: parse::parse_count(cell(indices.persons_killed)),
        crash_day: None,
        crash_hour: None,
        crash_month: None,
    }
    .with_derived()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str = "crash_date,crash_time,crash_year,borough,vehicle_type_code1,\
        contributing_factor_vehicle_1,latitude,longitude,number_of_pedestrians_injured,\
        number_of_cyclist_injured,number_of_motorist_injured,number_of_persons_injured,\
        number_of_persons_killed";

    fn store_from(csv_text: &str) -> DataStore {
        DataStore::from_reader(csv_text.as_bytes()).unwrap()
    }

    #[test]
    fn loads_records_with_derived_fields() {
        let store = store_from(&format!(
            "{FULL_HEADER}\n\
             2021-04-14,17:30,2021,BROOKLYN,Sedan,Driver Inattention,40.7,-73.9,1,0,0,1,0\n"
        ));

        assert_eq!(store.len(), 1);
        let record = &store.records()[0];
        assert_eq!(record.borough.as_deref(), Some("BROOKLYN"));
        assert_eq!(record.crash_year, Some(2021));
        assert_eq!(record.crash_day.as_deref(), Some("Wednesday"));
        assert_eq!(record.crash_hour, Some(17));
        assert_eq!(record.crash_month.as_deref(), Some("2021-04"));
        assert_eq!(record.pedestrians_injured, 1);
        assert!(store.columns().date && store.columns().time && store.columns().coordinates);
    }

    #[test]
    fn unparseable_date_and_time_keep_the_record() {
        let store = store_from(&format!(
            "{FULL_HEADER}\n\
             garbage,99:99,2020,QUEENS,SUV,Unspecified,,,0,0,1,1,0\n"
        ));

        assert_eq!(store.len(), 1);
        let record = &store.records()[0];
        assert_eq!(record.crash_day, None);
        assert_eq!(record.crash_hour, None);
        assert_eq!(record.crash_month, None);
        assert_eq!(record.crash_year, Some(2020));
        assert_eq!(record.latitude, None);
    }

    #[test]
    fn empty_cells_become_nulls() {
        let store = store_from(&format!(
            "{FULL_HEADER}\n\
             ,,,,,,,,,,,,\n"
        ));

        let record = &store.records()[0];
        assert_eq!(record.borough, None);
        assert_eq!(record.crash_year, None);
        assert_eq!(record.vehicle_type_code1, None);
        assert_eq!(record.persons_injured, 0);
    }

    #[test]
    fn domains_are_sorted_deduplicated_and_non_null() {
        let store = store_from(&format!(
            "{FULL_HEADER}\n\
             2021-01-01,08:00,2021,QUEENS,SUV,Unspecified,40.7,-73.9,0,0,0,0,0\n\
             2020-01-01,09:00,2020,BROOKLYN,Sedan,Driver Inattention,40.6,-73.8,0,0,0,0,0\n\
             2021-02-01,10:00,2021,BROOKLYN,Sedan,Unspecified,,,0,0,0,0,0\n\
             ,,,,,,,,0,0,0,0,0\n"
        ));

        let domains = store.domains();
        assert_eq!(domains.boroughs, vec!["BROOKLYN", "QUEENS"]);
        assert_eq!(domains.years, vec![2020, 2021]);
        assert_eq!(domains.vehicle_types, vec!["SUV", "Sedan"]);
        assert_eq!(domains.factors, vec!["Driver Inattention", "Unspecified"]);
    }

    #[test]
    fn missing_required_column_fails_the_load() {
        let result = DataStore::from_reader(
            "crash_date,crash_time,borough\n2021-01-01,08:00,QUEENS\n".as_bytes(),
        );
        match result {
            Err(LoadError::MissingColumn { column }) => assert_eq!(column, "crash_year"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_optional_columns_degrade_not_fail() {
        let store = store_from(
            "crash_year,borough,vehicle_type_code1,contributing_factor_vehicle_1,\
             number_of_pedestrians_injured,number_of_cyclist_injured,\
             number_of_motorist_injured,number_of_persons_injured,number_of_persons_killed\n\
             2021,BRONX,Sedan,Unspecified,0,0,0,0,0\n",
        );

        assert_eq!(store.len(), 1);
        assert!(!store.columns().date);
        assert!(!store.columns().time);
        assert!(!store.columns().coordinates);
        assert_eq!(store.records()[0].crash_day, None);
    }

    #[test]
    fn missing_file_fails_the_load() {
        assert!(DataStore::load("/nonexistent/crashes.csv").is_err());
    }

    #[test]
    fn float_formatted_year_cells_parse() {
        let store = store_from(&format!(
            "{FULL_HEADER}\n\
             2019-06-01,12:00,2019.0,MANHATTAN,Taxi,Following Too Closely,40.75,-73.98,0,0,0,0,0\n"
        ));
        assert_eq!(store.records()[0].crash_year, Some(2019));
    }
}
