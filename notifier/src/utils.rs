//! Fixed-point helpers
//!
//! On-chain amounts are integers scaled by `10^decimals`. They are converted to
//! `BigDecimal` without going through floating point so no rounding happens
//! before display.

use std::fmt;

use alloy::primitives::U256;
use bigdecimal::{
    num_bigint::{BigInt, Sign},
    BigDecimal, RoundingMode, Zero,
};
use serde::Serialize;

/// GRAI and every other debt-side amount use 18 decimals regardless of the
/// collateral asset.
pub const DEBT_TOKEN_DECIMALS: u8 = 18;

/// Exact `amount / 10^decimals`
pub fn to_decimal(amount: U256, decimals: u8) -> BigDecimal {
    let digits = BigInt::from_bytes_be(Sign::Plus, &amount.to_be_bytes::<32>());
    BigDecimal::new(digits, i64::from(decimals))
}

/// Scale of the stored LTV percentage
const LTV_SCALE: i64 = 4;

/// Render with a fixed number of fractional digits (half-even rounding).
///
/// Built from the unscaled digits so zero keeps its trailing zeros.
pub fn format_amount(value: &BigDecimal, places: i64) -> String {
    let places = places.max(0);
    let (digits, _) = value
        .with_scale_round(places, RoundingMode::HalfEven)
        .into_bigint_and_exponent();

    let sign = if digits.sign() == Sign::Minus { "-" } else { "" };
    let width = places as usize + 1;
    let padded = format!("{:0>width$}", digits.magnitude().to_string());
    let (int_part, frac_part) = padded.split_at(padded.len() - places as usize);

    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Loan-to-value ratio in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ltv {
    Percent(BigDecimal),
    /// Collateral value is zero so the ratio has no finite value
    Undefined,
}

impl fmt::Display for Ltv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ltv::Percent(value) => write!(f, "{}%", format_amount(value, 2)),
            Ltv::Undefined => f.write_str("undefined"),
        }
    }
}

/// `debt / collateral_value * 100`
pub fn ltv_percentage(debt: &BigDecimal, collateral_value: &BigDecimal) -> Ltv {
    if collateral_value.is_zero() {
        return Ltv::Undefined;
    }

    let percent = (debt / collateral_value) * BigDecimal::from(100);
    Ltv::Percent(percent.with_scale_round(LTV_SCALE, RoundingMode::HalfEven))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_to_decimal_is_exact() {
        assert_eq!(to_decimal(U256::from(1u64), 18), dec("0.000000000000000001"));
        assert_eq!(to_decimal(U256::from(100_000_000u64), 6), dec("100"));
        assert_eq!(to_decimal(U256::from(123_456_789u64), 0), dec("123456789"));
        assert_eq!(
            to_decimal(U256::from(1_234_567_890_123_456_789u128), 18),
            dec("1.234567890123456789")
        );
    }

    #[test]
    fn test_to_decimal_every_scale() {
        let raw = U256::from(987_654_321_012_345_678u128);
        for decimals in 0..=18u8 {
            let expected = BigDecimal::new(BigInt::from(987_654_321_012_345_678u128), i64::from(decimals));
            assert_eq!(to_decimal(raw, decimals), expected, "decimals = {decimals}");
        }
    }

    #[test]
    fn test_to_decimal_max_value() {
        let value = to_decimal(U256::MAX, 18);
        assert_eq!(value.with_scale(0).to_string(), (U256::MAX / U256::from(10u64).pow(U256::from(18u64))).to_string());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(&dec("80"), 2), "80.00");
        assert_eq!(format_amount(&dec("1.23456"), 4), "1.2346");
        assert_eq!(format_amount(&dec("0"), 2), "0.00");
        assert_eq!(format_amount(&dec("0.000"), 2), "0.00");
        assert_eq!(format_amount(&dec("0.004"), 2), "0.00");
        assert_eq!(format_amount(&dec("0.0312"), 2), "0.03");
        assert_eq!(format_amount(&dec("2.5"), 2), "2.50");
        assert_eq!(format_amount(&dec("12.345"), 0), "12");
        assert_eq!(format_amount(&dec("-1.5"), 3), "-1.500");
    }

    #[test]
    fn test_format_amount_half_even() {
        assert_eq!(format_amount(&dec("0.125"), 2), "0.12");
        assert_eq!(format_amount(&dec("0.135"), 2), "0.14");
    }

    #[test]
    fn test_ltv_percentage() {
        let ltv = ltv_percentage(&dec("200"), &dec("250"));
        assert_eq!(ltv, Ltv::Percent(dec("80")));
        assert_eq!(ltv.to_string(), "80.00%");
    }

    #[test]
    fn test_ltv_zero_collateral_is_undefined() {
        let ltv = ltv_percentage(&dec("200"), &dec("0"));
        assert_eq!(ltv, Ltv::Undefined);
        assert_eq!(ltv.to_string(), "undefined");

        // Zero debt against zero collateral is still undefined
        assert_eq!(ltv_percentage(&dec("0"), &dec("0.000")), Ltv::Undefined);
    }

    #[test]
    fn test_ltv_zero_debt() {
        let ltv = ltv_percentage(&dec("0"), &dec("250"));
        assert_eq!(ltv.to_string(), "0.00%");
    }

    #[test]
    fn test_ltv_is_rounded() {
        let ltv = ltv_percentage(&dec("1"), &dec("3"));
        let Ltv::Percent(percent) = &ltv else {
            panic!("expected a finite ratio");
        };
        assert_eq!(percent.to_string(), "33.3333");
        assert_eq!(ltv.to_string(), "33.33%");

        let json = serde_json::to_value(&ltv).unwrap();
        assert_eq!(json, serde_json::json!({ "percent": "33.3333" }));
    }
}
