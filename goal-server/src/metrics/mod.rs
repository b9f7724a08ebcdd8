//! Derived metrics
//!
//! Ratios over raw KPI values, gated by what the store tracks. Raw totals
//! come from `RawValues::from_entries` over the daily feed.

mod derived;

pub use derived::{add_f64, compute_derived, is_available, round_f64, sub_f64, to_decimal, to_f64};
