//! Number formatting for display.

/// Format a number with a B/M/K suffix and two decimals.
///
/// `1_250_000_000.0` → `"1.25B"`, `45_000.0` → `"45.00K"`, `999.0` → `"999.00"`.
/// Values below 1 000 (including negatives) are shown raw with thousands
/// separators.
pub fn format_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{}B", group_thousands(value / 1e9))
    } else if value >= 1e6 {
        format!("{}M", group_thousands(value / 1e6))
    } else if value >= 1e3 {
        format!("{}K", group_thousands(value / 1e3))
    } else {
        group_thousands(value)
    }
}

/// Dollar amount, e.g. `"$100.00K"`.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Percentage with one decimal, e.g. `"20.0%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Ratio with two decimals, e.g. `"1.43x"`.
pub fn format_multiple(value: f64) -> String {
    format!("{:.2}x", value)
}

/// Two decimals with comma-separated thousands.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        // inf / NaN
        return fixed;
    }

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
