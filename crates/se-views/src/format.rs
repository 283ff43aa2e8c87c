//! Number formatting for labels, tables and cards

use se_core::NumberFormat;

/// Text shown for a value that is absent or not a finite number
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a metric value for display
pub fn format_number(value: Option<f64>, format: NumberFormat) -> String {
    let value = match value.filter(|v| v.is_finite()) {
        Some(v) => v,
        None => return NOT_AVAILABLE.to_string(),
    };

    match format {
        NumberFormat::Percentage => format!("{:.1}%", value),
        NumberFormat::LargeNumber => {
            if value >= 1_000_000.0 {
                format!("{:.1}M", value / 1_000_000.0)
            } else if value >= 1_000.0 {
                format!("{:.1}K", value / 1_000.0)
            } else {
                format!("{:.1}", value)
            }
        }
        NumberFormat::Currency => format!("${}", group_thousands(&format!("{:.0}", value))),
        NumberFormat::Plain => value.to_string(),
    }
}

/// Fixed number of decimals with thousands separators
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => group_thousands(&format!("{:.*}", decimals, v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// At most `max_decimals` decimals, trailing zeros dropped, thousands separated
pub fn format_trimmed(value: Option<f64>, max_decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let fixed = format!("{:.*}", max_decimals, v);
            let trimmed = if fixed.contains('.') {
                fixed.trim_end_matches('0').trim_end_matches('.')
            } else {
                fixed.as_str()
            };
            group_thousands(trimmed)
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Signed percentage change, e.g. `+12.3%`
pub fn format_change(percentage: Option<f64>) -> String {
    match percentage.filter(|v| v.is_finite()) {
        Some(v) if v > 0.0 => format!("+{:.1}%", v),
        Some(v) => format!("{:.1}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Insert `,` every three digits of the integer part of a formatted number
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}
