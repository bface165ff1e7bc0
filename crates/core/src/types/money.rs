//! Minor-currency-unit money handling.
//!
//! The backend stores all amounts as integer minor units (cents for USD).
//! User-facing surfaces accept and display major units ("19.99"), so the
//! conversions here are the only place the two representations meet.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Errors converting user-entered amounts to minor units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount is negative.
    #[error("Amount must not be negative: {0}")]
    Negative(Decimal),

    /// Amount has more precision than one minor unit.
    #[error("Amount has sub-cent precision: {0}")]
    SubMinorPrecision(Decimal),

    /// Amount does not fit in an i64 of minor units.
    #[error("Amount out of range: {0}")]
    OutOfRange(Decimal),
}

/// Convert a major-unit amount (e.g. `19.99`) to integer minor units (`1999`).
///
/// # Errors
///
/// Returns `MoneyError` if the amount is negative, carries sub-cent
/// precision, or overflows `i64`.
pub fn to_minor(major: Decimal) -> Result<i64, MoneyError> {
    if major.is_sign_negative() {
        return Err(MoneyError::Negative(major));
    }
    let scaled = major * Decimal::from(100);
    if scaled.fract() != Decimal::ZERO {
        return Err(MoneyError::SubMinorPrecision(major));
    }
    scaled.to_i64().ok_or(MoneyError::OutOfRange(major))
}

/// Format integer minor units for display, e.g. `1999` -> `"$19.99"`.
#[must_use]
pub fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Format an optional minor-unit amount; absent values display as `"$0.00"`.
#[must_use]
pub fn format_minor_opt(minor: Option<i64>) -> String {
    format_minor(minor.unwrap_or(0))
}
