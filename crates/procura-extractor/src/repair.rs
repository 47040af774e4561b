//! Idempotent textual rewrites for almost-JSON
//!
//! Applied only after a strict parse has failed. Each transform is total
//! (never fails) and idempotent (a second application is a no-op), so
//! the pipeline can run over arbitrary junk and still return a string.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n\r]*").unwrap());
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static TRAILING_COMMA_BRACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\}").unwrap());
static TRAILING_COMMA_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\]").unwrap());
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new("```\\w*\n?").unwrap());

/// Apply the full repair pipeline to a candidate that failed to parse
///
/// Fixed order: smart-quote normalization, carriage-return stripping,
/// comment removal, trailing-comma removal, single-quote conversion.
pub fn repair(text: &str) -> String {
    let repaired = normalize_quotes(text);
    let repaired = strip_carriage_returns(&repaired);
    let repaired = strip_comments(&repaired);
    let repaired = strip_trailing_commas(&repaired);
    requote_single_quotes(&repaired)
}

/// Replace curly/smart quotes with their straight equivalents
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Remove carriage returns
pub fn strip_carriage_returns(text: &str) -> String {
    text.replace('\r', "")
}

/// Remove `//` line comments and `/* */` block comments
pub fn strip_comments(text: &str) -> String {
    let without_line = LINE_COMMENT.replace_all(text, "");
    BLOCK_COMMENT.replace_all(&without_line, "").into_owned()
}

/// Remove commas that sit immediately before a closing `}` or `]`
pub fn strip_trailing_commas(text: &str) -> String {
    let without_brace = TRAILING_COMMA_BRACE.replace_all(text, "}");
    TRAILING_COMMA_BRACKET
        .replace_all(&without_brace, "]")
        .into_owned()
}

/// Best-effort conversion of single-quoted tokens to double-quoted
///
/// A character scan rewrites an unescaped `'` to `"` unless it sits
/// inside a double-quoted string. Double quotes inside a single-quoted
/// token are left alone, so pathological mixes stay pathological; the
/// common `{'key': 'value'}` shape converts cleanly.
pub fn requote_single_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escape = false;

    for ch in text.chars() {
        if escape {
            out.push(ch);
            escape = false;
            continue;
        }
        match ch {
            '\\' => {
                out.push(ch);
                escape = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                out.push(ch);
            }
            '\'' if !in_double => {
                in_single = !in_single;
                out.push('"');
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Cleanup pass for answers returned by the generation service
///
/// Strips triple-backtick fences (with optional language tag), unwraps
/// one layer of quoting when the entire trimmed response is a single
/// JSON string, and unescapes the literal `\n`, `\"` and `\'` sequences
/// that sometimes leak from the service's own encoding.
pub fn clean_model_output(raw: &str) -> String {
    let mut cleaned = CODE_FENCE.replace_all(raw.trim(), "").trim().to_string();

    if cleaned.starts_with('"') && cleaned.ends_with('"') {
        if let Ok(Value::String(inner)) = serde_json::from_str::<Value>(&cleaned) {
            cleaned = inner;
        }
    }

    cleaned
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\'", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(f: fn(&str) -> String, input: &str) {
        let once = f(input);
        let twice = f(&once);
        assert_eq!(once, twice, "transform not idempotent for {:?}", input);
    }

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(
            normalize_quotes("{\u{201C}a\u{201D}: \u{2018}b\u{2019}}"),
            r#"{"a": 'b'}"#
        );
        assert_idempotent(normalize_quotes, "{\u{201C}a\u{201D}: 1}");
    }

    #[test]
    fn test_normalize_quotes_noop_on_clean_input() {
        let clean = r#"{"a": 1}"#;
        assert_eq!(normalize_quotes(clean), clean);
    }

    #[test]
    fn test_strip_carriage_returns() {
        assert_eq!(strip_carriage_returns("{\r\n\"a\": 1\r\n}"), "{\n\"a\": 1\n}");
        assert_idempotent(strip_carriage_returns, "a\r\nb");
    }

    #[test]
    fn test_strip_line_comments() {
        let input = "{\n  \"a\": 1, // the first field\n  \"b\": 2\n}";
        assert_eq!(strip_comments(input), "{\n  \"a\": 1, \n  \"b\": 2\n}");
        assert_idempotent(strip_comments, input);
    }

    #[test]
    fn test_strip_block_comments() {
        let input = "{ /* header\n spans lines */ \"a\": 1 }";
        assert_eq!(strip_comments(input), "{  \"a\": 1 }");
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(strip_trailing_commas(r#"{"a": 1,}"#), r#"{"a": 1}"#);
        assert_eq!(strip_trailing_commas("[1, 2,\n]"), "[1, 2]");
        assert_idempotent(strip_trailing_commas, r#"{"a": [1,],}"#);
    }

    #[test]
    fn test_requote_single_quotes() {
        assert_eq!(
            requote_single_quotes("{'name': 'Acme'}"),
            r#"{"name": "Acme"}"#
        );
        assert_idempotent(requote_single_quotes, "{'name': 'Acme'}");
    }

    #[test]
    fn test_requote_leaves_apostrophes_in_double_strings() {
        let input = r#"{"note": "it's fine"}"#;
        assert_eq!(requote_single_quotes(input), input);
    }

    #[test]
    fn test_repair_recovers_malformed_object() {
        let input = "{\u{201C}a\u{201D}: 1, // count\r\n 'b': 'two',}";
        let repaired = repair(input);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["a"], 1);
        assert_eq!(value["b"], "two");
    }

    #[test]
    fn test_repair_total_on_junk() {
        // Never panics, always returns a string
        let junk = "\\\\'{{{\u{201C}//";
        let _ = repair(junk);
    }

    #[test]
    fn test_clean_model_output_strips_fences() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(clean_model_output(raw), r#"{"a": 1}"#);

        let bare = "```\n[1, 2]\n```";
        assert_eq!(clean_model_output(bare), "[1, 2]");
    }

    #[test]
    fn test_clean_model_output_unwraps_quoted_json() {
        let raw = r#""{\"a\": 1}""#;
        assert_eq!(clean_model_output(raw), r#"{"a": 1}"#);
    }

    #[test]
    fn test_clean_model_output_unescapes_literals() {
        let raw = "{\\\"a\\\": \\\"line\\nbreak\\\"}";
        assert_eq!(clean_model_output(raw), "{\"a\": \"line\nbreak\"}");
    }

    #[test]
    fn test_clean_model_output_noop_on_clean_json() {
        let raw = r#"{"a": 1}"#;
        assert_eq!(clean_model_output(raw), raw);
    }
}
