//! Exact decimal arithmetic
//!
//! Nutrition values are summed as decimals so that totals like
//! `25.5 + 165.7` come out as `191.2` instead of a binary float approximation.
//! Missing or unparseable operands count as zero. Results that overflow the
//! decimal range saturate at `Decimal::MAX` / `Decimal::MIN`.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Conversion into a decimal operand, treating anything unusable as zero
pub trait IntoDecimal {
    fn into_decimal(self) -> Decimal;
}

impl IntoDecimal for Decimal {
    fn into_decimal(self) -> Decimal {
        self
    }
}

impl IntoDecimal for &Decimal {
    fn into_decimal(self) -> Decimal {
        *self
    }
}

impl IntoDecimal for f64 {
    fn into_decimal(self) -> Decimal {
        from_f64(self)
    }
}

impl IntoDecimal for i32 {
    fn into_decimal(self) -> Decimal {
        Decimal::from(self)
    }
}

impl IntoDecimal for i64 {
    fn into_decimal(self) -> Decimal {
        Decimal::from(self)
    }
}

impl IntoDecimal for u32 {
    fn into_decimal(self) -> Decimal {
        Decimal::from(self)
    }
}

impl IntoDecimal for &str {
    fn into_decimal(self) -> Decimal {
        parse_decimal(self).unwrap_or(Decimal::ZERO)
    }
}

impl<T: IntoDecimal> IntoDecimal for Option<T> {
    fn into_decimal(self) -> Decimal {
        self.map(IntoDecimal::into_decimal).unwrap_or(Decimal::ZERO)
    }
}

/// Convert an f64 through its shortest round-trip text form
///
/// `0.1_f64` becomes exactly `0.1`. NaN, infinities and values outside the
/// decimal range become zero.
pub fn from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&value.to_string()).unwrap_or(Decimal::ZERO)
}

/// Parse a numeric string, accepting plain and scientific notation
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Lossy conversion for JSON output
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn add(a: impl IntoDecimal, b: impl IntoDecimal) -> Decimal {
    a.into_decimal().saturating_add(b.into_decimal())
}

pub fn sub(a: impl IntoDecimal, b: impl IntoDecimal) -> Decimal {
    a.into_decimal().saturating_sub(b.into_decimal())
}

pub fn mul(a: impl IntoDecimal, b: impl IntoDecimal) -> Decimal {
    a.into_decimal().saturating_mul(b.into_decimal())
}

/// Divide, returning zero when the divisor is zero
pub fn div(a: impl IntoDecimal, b: impl IntoDecimal) -> Decimal {
    let divisor = b.into_decimal();
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    let dividend = a.into_decimal();
    dividend.checked_div(divisor).unwrap_or_else(|| {
        if dividend.is_sign_negative() == divisor.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Round to `decimals` fractional digits, halves away from zero
pub fn round(value: impl IntoDecimal, decimals: u32) -> Decimal {
    value
        .into_decimal()
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Round and render with exactly `decimals` fractional digits
///
/// `round_string(191.2, 2)` is `"191.20"`.
pub fn round_string(value: impl IntoDecimal, decimals: u32) -> String {
    let mut rounded = round(value, decimals);
    rounded.rescale(decimals);
    rounded.to_string()
}
