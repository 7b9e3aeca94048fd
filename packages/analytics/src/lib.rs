#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate view computation over filtered crash subsets.
//!
//! Each public function in [`views`] computes one of the eight dashboard
//! views as a pure function of the filtered subset; [`views::compute_dashboard`]
//! bundles all eight. No view shares mutable state with another, so the
//! order of computation is irrelevant.

pub mod views;

pub use views::{
    GEO_SAMPLE_CAP, TOP_FACTORS_LIMIT, TOP_VEHICLE_TYPES_LIMIT, UNKNOWN_BUCKET, compute_dashboard,
};
