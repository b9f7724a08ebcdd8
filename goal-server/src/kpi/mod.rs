//! KPI configuration
//!
//! Which raw metrics a store tracks and which role enters each of them.

mod store;

pub use store::{KpiConfigStore, apply_toggle};
