//! Applies a [`FilterCriteria`] to the record collection.
//!
//! Filtering is a pure set intersection: every non-`None` dimension is an
//! exact-equality conjunct, the injury class a strictly-positive count
//! conjunct. A record with a null field never matches a constraint on
//! that field, so an unknown constraint value silently yields an empty
//! result rather than an error.

use crash_map_crash_models::{CrashRecord, InjuryClass};

use crate::FilterCriteria;

/// Returns the subsequence of `records` satisfying every constraint in
/// `criteria`, in the original order.
#[must_use]
pub fn apply<'a>(records: &'a [CrashRecord], criteria: &FilterCriteria) -> Vec<&'a CrashRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .collect()
}

/// Returns `true` if `record` satisfies every constraint in `criteria`.
#[must_use]
pub fn matches(record: &CrashRecord, criteria: &FilterCriteria) -> bool {
    if let Some(borough) = &criteria.borough
        && record.borough.as_deref() != Some(borough.as_str())
    {
        return false;
    }

    if let Some(year) = criteria.year
        && record.crash_year != Some(year)
    {
        return false;
    }

    if let Some(vehicle_type) = &criteria.vehicle_type
        && record.vehicle_type_code1.as_deref() != Some(vehicle_type.as_str())
    {
        return false;
    }

    if let Some(factor) = &criteria.factor
        && record.contributing_factor_vehicle_1.as_deref() != Some(factor.as_str())
    {
        return false;
    }

    match criteria.injury_class {
        InjuryClass::Total => true,
        InjuryClass::Pedestrian => record.pedestrians_injured > 0,
        InjuryClass::Cyclist => record.cyclist_injured > 0,
        InjuryClass::Motorist => record.motorist_injured > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(borough: &str, year: i32) -> CrashRecord {
        CrashRecord {
            borough: Some(borough.to_owned()),
            crash_year: Some(year),
            vehicle_type_code1: Some("Sedan".to_owned()),
            contributing_factor_vehicle_1: Some("Unspecified".to_owned()),
            ..CrashRecord::default()
        }
    }

    fn sample() -> Vec<CrashRecord> {
        vec![
            CrashRecord {
                pedestrians_injured: 1,
                persons_injured: 1,
                ..record("BROOKLYN", 2021)
            },
            record("BROOKLYN", 2020),
            CrashRecord {
                cyclist_injured: 2,
                persons_injured: 2,
                ..record("QUEENS", 2021)
            },
            CrashRecord {
                borough: None,
                ..record("", 2021)
            },
        ]
    }

    #[test]
    fn unconstrained_criteria_keep_everything_in_order() {
        let records = sample();
        let filtered = apply(&records, &FilterCriteria::default());
        assert_eq!(filtered.len(), records.len());
        for (kept, original) in filtered.iter().zip(&records) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn dimensions_are_conjunctive() {
        let records = sample();
        let criteria = FilterCriteria {
            borough: Some("BROOKLYN".to_owned()),
            year: Some(2021),
            ..FilterCriteria::default()
        };
        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].pedestrians_injured, 1);
    }

    #[test]
    fn injury_class_requires_strictly_positive_count() {
        let records = sample();
        let criteria = FilterCriteria {
            injury_class: InjuryClass::Cyclist,
            ..FilterCriteria::default()
        };
        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].borough.as_deref(), Some("QUEENS"));
    }

    #[test]
    fn null_fields_never_match_a_constraint() {
        let records = sample();
        let criteria = FilterCriteria {
            borough: Some("UNKNOWN".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn unknown_values_silently_yield_empty() {
        let records = sample();
        let criteria = FilterCriteria {
            borough: Some("ATLANTIS".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria {
            year: Some(2021),
            ..FilterCriteria::default()
        };
        let once: Vec<CrashRecord> = apply(&records, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice = apply(&once, &criteria);
        assert_eq!(twice.len(), once.len());
        for (again, first) in twice.iter().zip(&once) {
            assert_eq!(*again, first);
        }
    }

    #[test]
    fn dimension_order_is_irrelevant() {
        let records = sample();
        let borough_only = FilterCriteria {
            borough: Some("BROOKLYN".to_owned()),
            ..FilterCriteria::default()
        };
        let year_only = FilterCriteria {
            year: Some(2021),
            ..FilterCriteria::default()
        };
        let both = FilterCriteria {
            borough: Some("BROOKLYN".to_owned()),
            year: Some(2021),
            ..FilterCriteria::default()
        };

        let borough_first: Vec<CrashRecord> = apply(&records, &borough_only)
            .into_iter()
            .cloned()
            .collect();
        let year_first: Vec<CrashRecord> =
            apply(&records, &year_only).into_iter().cloned().collect();

        let a: Vec<&CrashRecord> = apply(&borough_first, &year_only);
        let b: Vec<&CrashRecord> = apply(&year_first, &borough_only);
        let combined = apply(&records, &both);

        assert_eq!(a, b);
        assert_eq!(a, combined);
    }
}
