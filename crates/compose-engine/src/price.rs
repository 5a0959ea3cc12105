//! Price text formatting for card captions.

/// Format a price for display: currency symbol, thousands grouping, and
/// two decimals only when the price is fractional.
pub fn format_price(price: f64, currency: &str) -> String {
    let negative = price < 0.0;
    let abs = price.abs();

    let mut whole = abs.trunc() as u64;
    let mut cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    if cents >= 100 {
        whole += 1;
        cents = 0;
    }

    let grouped = group_thousands(whole);
    let body = if cents == 0 {
        grouped
    } else {
        format!("{grouped}.{cents:02}")
    };

    if negative {
        format!("-{currency}{body}")
    } else {
        format!("{currency}{body}")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_whole_prices_have_no_decimals() {
        assert_eq!(format_price(500.0, "$"), "$500");
        assert_eq!(format_price(0.0, "$"), "$0");
    }

    #[test]
    fn test_thousands_are_grouped() {
        assert_eq!(format_price(1200.0, "$"), "$1,200");
        assert_eq!(format_price(1234567.0, "$"), "$1,234,567");
    }

    #[test]
    fn test_fractional_prices_keep_two_decimals() {
        assert_eq!(format_price(12.5, "$"), "$12.50");
        assert_eq!(format_price(0.99, "$"), "$0.99");
    }

    #[test]
    fn test_rounding_can_carry_into_the_whole_part() {
        assert_eq!(format_price(19.999, "$"), "$20");
    }

    #[test]
    fn test_custom_currency_symbol() {
        assert_eq!(format_price(1200.0, "EUR "), "EUR 1,200");
    }

    proptest! {
        #[test]
        fn prop_grouping_preserves_digits(n in 0u64..1_000_000_000_000) {
            let grouped = group_thousands(n);
            prop_assert_eq!(grouped.replace(',', ""), n.to_string());
            for chunk in grouped.split(',').skip(1) {
                prop_assert_eq!(chunk.len(), 3);
            }
        }
    }
}
