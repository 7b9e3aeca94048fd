#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crash map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the record and view types to allow independent evolution of the
//! API contract.

use crash_map_crash_models::InjuryClass;
use crash_map_query::FilterCriteria;
use crash_map_store::CategoricalDomains;
use serde::{Deserialize, Serialize};

/// Query parameters for the dashboard endpoint.
///
/// Every parameter is optional; omitted or `"All"`/`"Total"` values place
/// no constraint. A non-empty `search` overrides the rest entirely.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardQueryParams {
    /// Borough selection, `"All"` for no constraint.
    pub borough: Option<String>,
    /// Year selection, `"All"` for no constraint.
    pub year: Option<String>,
    /// Vehicle type selection, `"All"` for no constraint.
    pub vehicle_type: Option<String>,
    /// Contributing factor selection, `"All"` for no constraint.
    pub factor: Option<String>,
    /// Injury class selection, `"Total"` for no constraint.
    pub injury: Option<String>,
    /// Free-text search phrase.
    pub search: Option<String>,
}

impl DashboardQueryParams {
    /// Converts the explicit selections into filter criteria, ignoring
    /// the search phrase (precedence is resolved by the caller).
    ///
    /// Unrecognized injury values fall back to `Total` and a
    /// non-numeric year to no constraint, silently, matching the
    /// behavior of unknown values on the other dimensions, which simply
    /// match nothing.
    #[must_use]
    pub fn explicit_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            borough: selection(self.borough.as_deref()),
            year: selection(self.year.as_deref()).and_then(|y| {
                let parsed = y.parse().ok();
                if parsed.is_none() {
                    log::debug!("Ignoring non-numeric year selection {y:?}");
                }
                parsed
            }),
            vehicle_type: selection(self.vehicle_type.as_deref()),
            factor: selection(self.factor.as_deref()),
            injury_class: self
                .injury
                .as_deref()
                .and_then(|i| i.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Maps an `"All"`/empty selection to `None`.
fn selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "All")
        .map(str::to_owned)
}

/// Selection options for every filter dimension, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Borough options, `"All"` first.
    pub boroughs: Vec<String>,
    /// Year options, `"All"` first.
    pub years: Vec<String>,
    /// Vehicle type options, `"All"` first.
    pub vehicle_types: Vec<String>,
    /// Contributing factor options, `"All"` first.
    pub factors: Vec<String>,
    /// The fixed injury-class enumeration.
    pub injury_classes: Vec<String>,
}

impl FilterOptions {
    /// Builds the option lists from the store's categorical domains,
    /// prefixing each with the `"All"` wildcard.
    #[must_use]
    pub fn from_domains(domains: &CategoricalDomains) -> Self {
        let with_all = |values: &[String]| -> Vec<String> {
            std::iter::once("All".to_owned())
                .chain(values.iter().cloned())
                .collect()
        };

        Self {
            boroughs: with_all(&domains.boroughs),
            years: std::iter::once("All".to_owned())
                .chain(domains.years.iter().map(ToString::to_string))
                .collect(),
            vehicle_types: with_all(&domains.vehicle_types),
            factors: with_all(&domains.factors),
            injury_classes: InjuryClass::all()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}
