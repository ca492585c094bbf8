//! Number and duration formatting shared by the web page and the terminal report.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to `dp` places and always prints `dp` places.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(dp);
    rounded.to_string()
}

/// Inserts `,` every three digits of the integer part.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `$11,000.00`
pub fn usd(value: Decimal) -> String {
    format!("${}", group_thousands(&fixed(value, 2)))
}

/// `$10,000`
pub fn usd_whole(value: Decimal) -> String {
    format!("${}", group_thousands(&fixed(value, 0)))
}

/// `+10.00%` / `-3.25%`
pub fn signed_pct(value: Decimal) -> String {
    let body = fixed(value, 2);
    if body.starts_with('-') {
        format!("{body}%")
    } else {
        format!("+{body}%")
    }
}

/// `62.5%` with `dp` decimals.
pub fn pct(value: Decimal, dp: u32) -> String {
    format!("{}%", fixed(value, dp))
}

/// Renders whole seconds as `H:MM:SS`, prefixed with `N day(s), ` past a day.
pub fn duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let rem = total_seconds % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}
