/// Number formatting for counts and entry values
///
/// Values are rounded to two decimals and the integer part is grouped in
/// threes with a narrow no-break space (U+202F).

/// Thousands separator
pub const NARROW_NO_BREAK_SPACE: char = '\u{202F}';

/// Beyond this magnitude hundredths no longer fit an `i128`
const MAX_GROUPED: f64 = 1e30;

/// Format `value` with thousands separators and at most two decimals
///
/// Whole numbers get no decimal point; trailing zero decimals are dropped.
/// A value that rounds to zero is shown as `0` without a sign.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value.abs() >= MAX_GROUPED {
        return value.to_string();
    }

    // Work in whole hundredths so 0.1 + 0.2 style drift never reaches the output.
    // Ties round up, so -0.125 becomes -0.12.
    let hundredths = (value * 100.0 + 0.5).floor() as i128;
    let negative = hundredths < 0;
    let magnitude = hundredths.unsigned_abs();
    let integer = magnitude / 100;
    let fraction = magnitude % 100;

    let mut result = group_thousands(&integer.to_string());
    if fraction > 0 {
        let decimals = format!("{:02}", fraction);
        result.push('.');
        result.push_str(decimals.trim_end_matches('0'));
    }

    if negative {
        result.insert(0, '-');
    }
    result
}

/// Like `format_number`, with a leading `+` for strictly positive values
pub fn format_number_with_sign(value: f64) -> String {
    let formatted = format_number(value);
    if value > 0.0 {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * NARROW_NO_BREAK_SPACE.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(NARROW_NO_BREAK_SPACE);
        }
        out.push(c);
    }
    out
}
