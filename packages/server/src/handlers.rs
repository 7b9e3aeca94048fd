//! HTTP handler functions for the crash map API.

use actix_web::{HttpResponse, web};
use crash_map_analytics::compute_dashboard;
use crash_map_query::{filter, search};
use crash_map_server_models::{ApiHealth, DashboardQueryParams, FilterOptions};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Returns the selection options for every filter dimension, each
/// prefixed with the `"All"` wildcard, plus the injury-class list.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(FilterOptions::from_domains(state.store.domains()))
}

/// `GET /api/dashboard`
///
/// Resolves the query's explicit selections and optional search phrase
/// into one criteria value (a non-empty search overrides the selections
/// entirely), filters the snapshot, and returns the eight aggregate
/// views.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let store = &state.store;

    let criteria = search::resolve_criteria(
        params.explicit_criteria(),
        params.search.as_deref().unwrap_or(""),
        store.domains(),
    );

    let filtered = filter::apply(store.records(), &criteria);
    log::debug!(
        "Dashboard query matched {} of {} records ({criteria:?})",
        filtered.len(),
        store.len(),
    );

    HttpResponse::Ok().json(compute_dashboard(&filtered, store.columns()))
}
