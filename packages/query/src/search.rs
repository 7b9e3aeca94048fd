//! Heuristic search-intent parsing.
//!
//! Maps a free-text phrase like `"brooklyn 2021 pedestrian"` onto a
//! [`FilterCriteria`]. The rules are deliberately simple substring and
//! token tests against the observed categorical domains; vehicle type
//! and contributing factor are never set by search.

use crash_map_crash_models::InjuryClass;
use crash_map_store::CategoricalDomains;

use crate::FilterCriteria;

/// Parses a free-text search phrase into filter criteria.
///
/// Rules, applied to the lower-cased, trimmed input:
/// 1. empty input yields unconstrained criteria;
/// 2. the first borough (in sorted domain order) whose lower-cased name
///    occurs anywhere in the text wins;
/// 3. the first whitespace token of exactly four digits becomes the year;
/// 4. injury keywords resolve in fixed priority order: pedestrian,
///    cyclist, motorist.
#[must_use]
pub fn parse_search(text: &str, domains: &CategoricalDomains) -> FilterCriteria {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return FilterCriteria::default();
    }

    let mut criteria = FilterCriteria::default();

    for borough in &domains.boroughs {
        if text.contains(&borough.to_lowercase()) {
            criteria.borough = Some(borough.clone());
            break;
        }
    }

    for token in text.split_whitespace() {
        if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
            criteria.year = token.parse().ok();
            break;
        }
    }

    criteria.injury_class = if text.contains("pedestrian") || text.contains("ped") {
        InjuryClass::Pedestrian
    } else if text.contains("cyclist") || text.contains("bike") {
        InjuryClass::Cyclist
    } else if text.contains("motorist") || text.contains("driver") {
        InjuryClass::Motorist
    } else {
        InjuryClass::Total
    };

    log::debug!("Parsed search {text:?} into {criteria:?}");
    criteria
}

/// Resolves a query's explicit selections and optional search phrase into
/// one criteria value.
///
/// A non-empty search phrase replaces the explicit selections entirely;
/// there is no field-by-field merge.
#[must_use]
pub fn resolve_criteria(
    explicit: FilterCriteria,
    search: &str,
    domains: &CategoricalDomains,
) -> FilterCriteria {
    if search.trim().is_empty() {
        explicit
    } else {
        parse_search(search, domains)
    }
}
