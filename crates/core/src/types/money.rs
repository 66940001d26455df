//! Money arithmetic helpers.
//!
//! Monetary amounts are [`rust_decimal::Decimal`] everywhere; floats never
//! enter price computation. Amounts cross serialization boundaries as strings
//! with exactly two decimal digits (`rust_decimal`'s string serde), so every
//! derived amount is normalized to scale 2 before it leaves a computation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to two decimal digits.
///
/// Midpoints round away from zero (2.345 -> 2.35), and the result always
/// carries exactly two fractional digits so `10` serializes as `"10.00"`.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
