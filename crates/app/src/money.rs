//! Conversion between decimal currency amounts and stored minor units.
//!
//! Amounts cross the API as decimals with at most two places (`9.99`) and are
//! stored as integer minor units (`999`).

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Decimal places carried by every amount.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Why an amount cannot be stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("must not be negative")]
    Negative,

    #[error("must have at most {MINOR_UNIT_SCALE} decimal places")]
    TooPrecise,

    #[error("is too large")]
    OutOfRange,
}

/// Convert a decimal amount such as `24.97` into minor units (`2497`).
///
/// # Errors
///
/// Rejects negative amounts, amounts with more than two decimal places, and
/// amounts that do not fit in `u64` minor units.
pub fn to_minor_units(amount: Decimal) -> Result<u64, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::Negative);
    }

    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(MoneyError::OutOfRange)?;

    if !minor.fract().is_zero() {
        return Err(MoneyError::TooPrecise);
    }

    minor.trunc().to_u64().ok_or(MoneyError::OutOfRange)
}

/// Render minor units (`2497`) as a two-place decimal (`24.97`).
#[must_use]
pub fn from_minor_units(minor: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(minor), MINOR_UNIT_SCALE)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn converts_two_place_amounts() -> TestResult {
        assert_eq!(to_minor_units(Decimal::from_str("9.99")?), Ok(999));
        assert_eq!(to_minor_units(Decimal::from_str("31.97")?), Ok(3_197));
        assert_eq!(to_minor_units(Decimal::from_str("5")?), Ok(500));
        assert_eq!(to_minor_units(Decimal::from_str("0.5")?), Ok(50));
        assert_eq!(to_minor_units(Decimal::ZERO), Ok(0));

        Ok(())
    }

    #[test]
    fn trailing_zeros_beyond_two_places_are_accepted() -> TestResult {
        assert_eq!(to_minor_units(Decimal::from_str("4.9900")?), Ok(499));

        Ok(())
    }

    #[test]
    fn rejects_sub_cent_amounts() -> TestResult {
        assert_eq!(
            to_minor_units(Decimal::from_str("9.999")?),
            Err(MoneyError::TooPrecise)
        );

        Ok(())
    }

    #[test]
    fn rejects_negative_amounts() -> TestResult {
        assert_eq!(
            to_minor_units(Decimal::from_str("-0.01")?),
            Err(MoneyError::Negative)
        );

        Ok(())
    }

    #[test]
    fn renders_minor_units_with_two_places() {
        assert_eq!(from_minor_units(3_197).to_string(), "31.97");
        assert_eq!(from_minor_units(500).to_string(), "5.00");
        assert_eq!(from_minor_units(0).to_string(), "0.00");
    }
}
