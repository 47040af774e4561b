//! Layered lenient parsing of JSON-like text

use crate::balanced::extract_balanced;
use crate::repair::repair;
use serde_json::Value;

/// Parse a JSON value out of arbitrary text, tolerating common artifacts
///
/// Strategies in order, short-circuiting on the first success:
///
/// 1. strict parse of the full trimmed text
/// 2. balanced extraction, then strict parse of the candidate
/// 3. balanced extraction, then textual repair, then parse
///
/// Returns `None` when no structure is recoverable; callers apply their
/// own fallback. Never panics.
pub fn parse_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Some(value);
    }

    let candidate = extract_balanced(text)?;
    if let Ok(value) = serde_json::from_str(&candidate) {
        return Some(value);
    }

    serde_json::from_str(&repair(&candidate)).ok()
}
