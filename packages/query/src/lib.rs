#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query resolution for the crash data store.
//!
//! A query arrives as either explicit per-dimension selections or a
//! free-text search phrase. Both resolve to one canonical
//! [`FilterCriteria`] value (a non-empty search phrase replaces the
//! explicit selections entirely), which the filter engine then applies
//! to the record collection.

pub mod filter;
pub mod search;

use crash_map_crash_models::InjuryClass;
use serde::{Deserialize, Serialize};

/// Canonical description of "what subset of records to show".
///
/// `None` on a dimension (and [`InjuryClass::Total`]) means no constraint.
/// Instances are built per query and discarded after use.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Exact borough to match.
    pub borough: Option<String>,
    /// Exact crash year to match.
    pub year: Option<i32>,
    /// Exact vehicle type to match.
    pub vehicle_type: Option<String>,
    /// Exact contributing factor to match.
    pub factor: Option<String>,
    /// Injury classification constraint.
    pub injury_class: InjuryClass,
}

impl FilterCriteria {
    /// Returns `true` if no dimension is constrained.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.borough.is_none()
            && self.year.is_none()
            && self.vehicle_type.is_none()
            && self.factor.is_none()
            && matches!(self.injury_class, InjuryClass::Total)
    }
}
