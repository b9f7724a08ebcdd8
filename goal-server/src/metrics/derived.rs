//! Derived Metrics Calculator
//!
//! All ratios go through `Decimal` and are rounded half-up to 2 decimal
//! places before being handed back as `f64`. Operands or results outside the
//! `Decimal` range fall back to plain `f64` arithmetic.

use rust_decimal::prelude::*;
use shared::models::{DerivedMetricId, DerivedMetricValue, KpiConfig, RawValues};

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input is logged and treated as zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in metric calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round half-up to 2 decimal places
///
/// Values outside the `Decimal` range are returned unchanged.
#[inline]
pub fn round_f64(value: f64) -> f64 {
    Decimal::from_f64(value).map(to_f64).unwrap_or(value)
}

/// `a + b` in `Decimal`, `f64` when out of range
pub fn add_f64(a: f64, b: f64) -> f64 {
    match (Decimal::from_f64(a), Decimal::from_f64(b)) {
        (Some(x), Some(y)) => x.checked_add(y).map(to_f64).unwrap_or(a + b),
        _ => a + b,
    }
}

/// `a - b` in `Decimal`, `f64` when out of range
pub fn sub_f64(a: f64, b: f64) -> f64 {
    match (Decimal::from_f64(a), Decimal::from_f64(b)) {
        (Some(x), Some(y)) => x.checked_sub(y).map(to_f64).unwrap_or(a - b),
        _ => a - b,
    }
}

/// A derived metric is available when every prerequisite is tracked
pub fn is_available(id: DerivedMetricId, config: &KpiConfig) -> bool {
    id.prerequisites().iter().all(|m| config.is_enabled(*m))
}

/// Ratio, 0 when the denominator is 0
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        return 0.0;
    }
    match (Decimal::from_f64(numerator), Decimal::from_f64(denominator)) {
        (Some(num), Some(den)) if !den.is_zero() => num
            .checked_div(den)
            .map(to_f64)
            .unwrap_or_else(|| round_f64(numerator / denominator)),
        _ => round_f64(numerator / denominator),
    }
}

/// Compute every derived metric in fixed order
///
/// Unavailable metrics come back with `active = false` and no value.
pub fn compute_derived(raw: &RawValues, config: &KpiConfig) -> Vec<DerivedMetricValue> {
    DerivedMetricId::ALL
        .into_iter()
        .map(|id| {
            if !is_available(id, config) {
                return DerivedMetricValue {
                    id,
                    value: None,
                    active: false,
                };
            }
            let (num, den) = id.operands();
            DerivedMetricValue {
                id,
                value: Some(ratio(raw.get(num), raw.get(den))),
                active: true,
            }
        })
        .collect()
}
