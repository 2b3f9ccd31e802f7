//! Decimal money helpers
//!
//! Arithmetic happens on `Decimal`; values become `f64` (rounded to cents)
//! only when written into a serializable model.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// One cent
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in report calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Exact conversion of an input amount; `None` for non-finite values and
/// magnitudes outside `Decimal`'s range
#[inline]
pub fn try_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

/// Round to cents (midpoint away from zero)
#[inline]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert back to f64 for serialization, rounded to cents
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_cents(value).to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal out of f64 range, defaulting to zero");
        0.0
    })
}
