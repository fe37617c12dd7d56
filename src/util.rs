// Utility helpers for parsing and display formatting.
//
// This module centralizes the "dirty" CSV/number handling so the rest of the
// code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    // `?` propagates `None` early if the option is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

/// Round to 2 decimal places, half away from zero. Applied once per output
/// value; intermediate sums are never rounded.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Cut a product name to at most 40 characters, appending `...` when it was
/// longer. A name of exactly 40 characters passes through untouched.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let cut: String = name.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        name.to_string()
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Display adapter for `tabled` money columns.
pub fn fmt_money(v: &f64) -> String {
    format_number(*v, 2)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,800 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_strips_thousands_separators() {
        assert_eq!(parse_f64_safe(Some("1,234.56")), Some(1234.56));
        assert_eq!(parse_f64_safe(Some("  42 ")), Some(42.0));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn round2_half_away_from_zero() {
        assert_eq!(round2(100.555), 100.56);
        assert_eq!(round2(2.005), 2.01);
        assert_eq!(round2(1.0), 1.0);
    }

    #[test]
    fn truncate_name_boundary() {
        let exactly_40 = "a".repeat(40);
        assert_eq!(truncate_name(&exactly_40, 40), exactly_40);
        let forty_one = "b".repeat(41);
        let cut = truncate_name(&forty_one, 40);
        assert_eq!(cut.len(), 43);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..40], &forty_one[..40]);
    }

    #[test]
    fn format_number_groups_digits() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-12.5, 2), "-12.50");
        assert_eq!(format_number(0.0, 0), "0");
    }
}
