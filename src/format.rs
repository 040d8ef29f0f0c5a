//! Plain text formatting of KPI values for the command line.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::delta::DeltaResult;

/// Formats `number` as dollars and cents, e.g. "$1,234.50" or "-$3.20".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("currency prefix is valid")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("currency prefix is valid")
            .precision(Precision::Decimals(2))
    });

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    pad_cents(formatted_string)
}

/// numfmt drops trailing zeros, so "12.30" comes out as "12.3" and "5.00" as "5".
fn pad_cents(mut formatted: String) -> String {
    match formatted.rsplit_once('.').map(|(_, cents)| cents.len()) {
        Some(digits) => {
            for _ in digits..2 {
                formatted.push('0');
            }
        }
        None => formatted.push_str(".00"),
    }

    formatted
}

/// Formats a percentage with one decimal place, e.g. "12.5%".
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid "-0.0%".
    if rounded == 0.0 {
        "0.0%".to_owned()
    } else {
        format!("{rounded:.1}%")
    }
}

/// Formats a delta for a KPI card, e.g. "+12.5%", "0.0%" or "new".
pub fn format_delta(result: DeltaResult) -> String {
    match result {
        DeltaResult::Finite {
            is_neutral: true, ..
        } => "0.0%".to_owned(),
        DeltaResult::Finite { value, .. } if value > 0.0 => format!("+{}", format_percent(value)),
        DeltaResult::Finite { value, .. } => format_percent(value),
        DeltaResult::PositiveInfinite => "new".to_owned(),
        DeltaResult::Undefined => "n/a".to_owned(),
    }
}
