//! Formatting of amounts and percentages for the text report.

use numfmt::{Formatter, Precision};

/// Format `number` as currency with two decimal places and thousands
/// separators, e.g. `$1,234.50` or `-$12.30`.
pub fn format_currency(number: f64, symbol: &str) -> String {
    let magnitude = format_magnitude(number.abs(), symbol);

    if number < 0.0 && magnitude != format!("{symbol}0.00") {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn format_magnitude(number: f64, symbol: &str) -> String {
    // Zero is hardcoded as "0" by numfmt, so we must specify the formatted string for zero
    if number == 0.0 {
        return format!("{symbol}0.00");
    }

    let formatter = match Formatter::currency(symbol) {
        Ok(formatter) => formatter.precision(Precision::Decimals(2)),
        Err(error) => {
            tracing::debug!("Could not create currency formatter for {symbol:?}: {error:?}");
            return format!("{symbol}{number:.2}");
        }
    };

    pad_decimals(formatter.fmt_string(number))
}

/// numfmt omits trailing zeros, so "12.30" is rendered as "12.3" and "12.00"
/// as "12". Put them back.
fn pad_decimals(formatted: String) -> String {
    match formatted.rfind('.') {
        Some(index) => {
            let decimals = formatted.len() - index - 1;

            if decimals >= 2 {
                formatted
            } else {
                format!("{formatted}{}", "0".repeat(2 - decimals))
            }
        }
        None => format!("{formatted}.00"),
    }
}

/// Formats a percentage with one decimal place, avoiding "-0.0%".
pub fn format_percentage(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;

    if rounded == 0.0 {
        "0.0%".to_owned()
    } else {
        format!("{rounded:.1}%")
    }
}
