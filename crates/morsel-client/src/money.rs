//! Currency text <-> decimal conversion.
//!
//! Source prices arrive as text such as `$1,234.50`. The derived dataset
//! writes amounts back out as `$` followed by a plain decimal, so
//! [`parse_currency`] must accept everything [`format_currency`] and
//! [`format_price`] produce.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: char = '$';

const STRIPPED_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', ','];

/// Parses a currency-formatted amount. Returns `None` when anything other
/// than a decimal number remains after removing symbols and separators.
pub fn parse_currency(value: &str) -> Option<Decimal> {
    let cleaned = value
        .chars()
        .filter(|character| !STRIPPED_SYMBOLS.contains(character) && !character.is_whitespace())
        .collect::<String>();
    if cleaned.is_empty() || cleaned.contains('_') {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Rounds to whole cents using banker's rounding.
pub fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// `$` + amount with exactly two decimals and no thousands separators.
pub fn format_currency(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", round_cents(amount))
}

/// Like [`format_currency`] but never drops precision: prices keep their
/// own scale when it exceeds two decimals.
pub fn format_price(price: Decimal) -> String {
    let mut value = price.normalize();
    if value.scale() < 2 {
        value.rescale(2);
    }
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    format!("{CURRENCY_SYMBOL}{value}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{format_currency, format_price, parse_currency, round_cents};

    #[test]
    fn strips_symbols_and_thousands_separators() {
        assert_eq!(parse_currency("$1,234.50"), Some(dec!(1234.50)));
        assert_eq!(parse_currency(" $3.00 "), Some(dec!(3.00)));
        assert_eq!(parse_currency("5"), Some(dec!(5)));
        assert_eq!(parse_currency("$-5.25"), Some(dec!(-5.25)));
        assert_eq!(parse_currency("-$5.25"), Some(dec!(-5.25)));
    }

    #[test]
    fn rejects_non_numeric_residue() {
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("$3.00abc"), None);
        assert_eq!(parse_currency("three dollars"), None);
        assert_eq!(parse_currency("1.2.3"), None);
    }

    #[test]
    fn formats_two_decimals_without_separators() {
        assert_eq!(format_currency(dec!(2469)), "$2469.00");
        assert_eq!(format_currency(dec!(1234.5) * Decimal::from(2)), "$2469.00");
        assert_eq!(format_currency(dec!(0.125)), "$0.12");
        assert_eq!(format_currency(dec!(0.135)), "$0.14");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn price_formatting_keeps_extra_precision() {
        assert_eq!(format_price(dec!(3)), "$3.00");
        assert_eq!(format_price(dec!(3.000)), "$3.00");
        assert_eq!(format_price(dec!(1.005)), "$1.005");
    }

    #[test]
    fn formatted_amounts_parse_back_to_rounded_value() {
        for amount in [dec!(0), dec!(0.01), dec!(12.345), dec!(2469), dec!(-7.5), dec!(99999.999)] {
            let text = format_currency(amount);
            assert_eq!(parse_currency(&text), Some(round_cents(amount)), "{text}");
            let delta = (round_cents(amount) - amount).abs();
            assert!(delta <= dec!(0.005));
        }
    }
}
