//! Monetary amounts: parsing from and formatting to the wire.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ActudError;
use super::field::Field;

/// Parse an amount. Sign is checked separately by [`check_non_negative`].
pub(crate) fn parse_amount(field: Field, value: &str) -> Result<Decimal, ActudError> {
    Decimal::from_str(value)
        .map_err(|_| ActudError::value(field, format!("'{value}' is not a decimal amount")))
}

/// Reject negative amounts.
pub(crate) fn check_non_negative(field: Field, amount: Decimal) -> Result<Decimal, ActudError> {
    if amount < Decimal::ZERO {
        return Err(ActudError::value(field, "the value must not be negative"));
    }
    Ok(amount)
}

/// Round to cents, half away from zero.
pub(crate) fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format with exactly two decimal places, rounding half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_amount(amount);
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_amount(dec!(17.9)), "17.90");
        assert_eq!(format_amount(dec!(4.12)), "4.12");
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(1000)), "1000.00");
        assert_eq!(format_amount(dec!(2.345)), "2.35");
        assert_eq!(format_amount(dec!(2.344)), "2.34");
    }

    #[test]
    fn sub_cent_amounts_round_to_zero() {
        assert!(round_amount(dec!(0.001)).is_zero());
        assert!(round_amount(dec!(0.0049)).is_zero());
        assert_eq!(round_amount(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_amount(Field::Vat1, "17.90").unwrap(), dec!(17.90));
        assert_eq!(parse_amount(Field::Vat1, "0").unwrap(), dec!(0));
        assert_eq!(parse_amount(Field::Vat1, "-1.5").unwrap(), dec!(-1.5));
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_amount(Field::GrossTotal, "abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "GrossTotal is not valid: 'abc' is not a decimal amount"
        );
        assert!(parse_amount(Field::GrossTotal, "").is_err());
        assert!(parse_amount(Field::GrossTotal, "1,50").is_err());
    }

    #[test]
    fn rejects_negative() {
        assert!(check_non_negative(Field::Vat1, dec!(-0.01)).is_err());
        assert_eq!(check_non_negative(Field::Vat1, dec!(0)).unwrap(), dec!(0));
    }
}
