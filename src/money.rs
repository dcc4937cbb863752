//! Money formatting

use rusty_money::{Money, iso::Currency};

/// Render an amount as a localized price string.
///
/// Currencies written with a trailing symbol group thousands with `.` and separate the
/// fraction with `,` (`200.000 ₫`); leading-symbol currencies use `,` and `.` (`$1,234.50`).
pub fn format_price(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();

    let (group_separator, fraction_separator) = if currency.symbol_first {
        (',', '.')
    } else {
        ('.', ',')
    };

    let minor = money.to_minor_units();
    let magnitude = minor.unsigned_abs();
    let scale = 10_u64.pow(currency.exponent);

    let mut amount = group_digits(magnitude / scale, group_separator);

    if currency.exponent > 0 {
        let width = usize::try_from(currency.exponent).unwrap_or_default();

        amount.push(fraction_separator);
        amount.push_str(&format!("{:0width$}", magnitude % scale));
    }

    let sign = if minor < 0 { "-" } else { "" };

    if currency.symbol_first {
        format!("{sign}{}{amount}", currency.symbol)
    } else {
        format!("{sign}{amount} {}", currency.symbol)
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }

        grouped.push(digit);
    }

    grouped
}
