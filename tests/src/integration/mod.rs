//! # Integration Tests
//!
//! Whole-crate flows across the membership and telemetry crates.

pub mod cross_filter;
pub mod scenarios;
pub mod telemetry_wiring;
