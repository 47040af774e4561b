//! Balanced-delimiter scanning for JSON-like substrings
//!
//! Naive regex matching of `{.*}` fails on nested structures and on
//! braces embedded in string values. This scanner is a minimal
//! single-pass state machine adequate for JSON-like text without
//! implementing a full JSON grammar.

/// Locate the first balanced JSON-like value inside arbitrary text
///
/// Scans from the first `{` or `[` and returns the substring through the
/// matching closing token, verbatim. A quoted-string flag (toggled on an
/// unescaped `"` or `'`) keeps structural characters inside string
/// values from affecting the depth count; a pending-escape flag skips
/// the character following a backslash. Only the opening token's own
/// pair participates in depth tracking.
///
/// Returns `None` when no opening token exists or the text ends before
/// the depth returns to zero.
pub fn extract_balanced(text: &str) -> Option<String> {
    let start = text.find(['{', '['])?;
    let open = if text[start..].starts_with('{') { '{' } else { '[' };
    let close = if open == '{' { '}' } else { ']' };

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in text[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if ch == '\\' {
            escape = true;
            continue;
        }
        if ch == '"' || ch == '\'' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(text[start..start + i + 1].to_string());
            }
        }
    }

    None
}
