//! Tolerant coercion of heterogeneous scalar representations
//!
//! Source records state numbers every way imaginable: `1200`, `"1,200"`,
//! `"$1,234.50"`, `"30 days"`. These helpers recover a number where one
//! is plausibly present and return `None` otherwise.

use serde_json::Value;

/// Coerce a dynamic value into a finite number
///
/// Numbers pass through. Strings are trimmed, stripped of everything
/// outside digits, `.` and `-` (thousands separators, currency symbols,
/// units), then parsed. Everything else, and anything that does not
/// parse to a finite number, is `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            let cleaned: String = trimmed
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Coerce a dynamic value into a percentage in [0, 100]
///
/// Applies [`coerce_number`], clamps into the closed interval and rounds
/// to 2 decimal places.
pub fn coerce_percent(value: &Value) -> Option<f64> {
    let n = coerce_number(value)?;
    let capped = n.clamp(0.0, 100.0);
    Some((capped * 100.0).round() / 100.0)
}

/// Coerce a dynamic value into an integer by truncation
pub fn coerce_int(value: &Value) -> Option<i64> {
    coerce_number(value).map(|n| n.trunc() as i64)
}
