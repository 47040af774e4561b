//! Field alias tables for duck-typed source records
//!
//! Generation output and human replies name the same logical field many
//! ways (`qty` / `quantity` / `Qty`). Every logical field gets an
//! explicit ordered candidate list, consulted in priority order, instead
//! of inline conditional chains.
//!
//! Two lookup disciplines exist, matching how sources actually misuse
//! fields: *presence* selection ([`pick`]) takes the first key holding a
//! non-null value and suits numeric fields where `0` is meaningful
//! input; *truthy* selection ([`pick_truthy`], [`pick_string`],
//! [`pick_id`]) also skips empty strings, `0` and `false`, and suits
//! name/id fields where an empty value is as good as absent.

use serde_json::{Map, Value};

/// Ordered key candidates per logical field
pub mod aliases {
    /// Vendor display name
    pub const VENDOR_NAME: &[&str] = &["vendor_name", "vendor", "supplier"];
    /// Line-item collection
    pub const LINE_ITEMS: &[&str] = &["line_items", "items", "lines"];
    /// Line-item name
    pub const ITEM_NAME: &[&str] = &["name", "item", "description"];
    /// Line-item quantity
    pub const ITEM_QTY: &[&str] = &["qty", "quantity", "Qty"];
    /// Line-item unit price
    pub const ITEM_UNIT_PRICE: &[&str] = &["unit_price", "unitPrice", "price", "rate"];
    /// Line-item extended price
    pub const ITEM_TOTAL: &[&str] = &["total_price", "total", "extended"];
    /// Line-item notes
    pub const ITEM_NOTES: &[&str] = &["notes", "specs", "description"];
    /// Proposal-level total
    pub const TOTAL_PRICE: &[&str] = &["total_price", "total", "price_total"];
    /// Delivery lead time
    pub const DELIVERY_DAYS: &[&str] = &["delivery_days", "delivery", "lead_time"];
    /// Warranty period
    pub const WARRANTY_MONTHS: &[&str] = &["warranty_months", "warranty", "warranty_month"];
    /// Payment terms
    pub const PAYMENT_TERMS: &[&str] = &["payment_terms", "terms", "payment"];
    /// Explicit missing-field list supplied by the source itself
    pub const MISSING: &[&str] = &["missing_information", "missing"];
    /// Evaluation: proposal identifier
    pub const PROPOSAL_ID: &[&str] = &["proposal_id", "id"];
    /// Evaluation: vendor identifier
    pub const VENDOR_ID: &[&str] = &["vendor_id", "vendor"];
    /// Evaluation: attributed total price
    pub const PRICE_TOTAL: &[&str] = &["price_total", "total_price", "price"];
    /// Evaluation: spec match score
    pub const SPEC_MATCH: &[&str] = &["spec_match_score", "spec_match", "spec_score"];
    /// Evaluation: delivery risk
    pub const DELIVERY_RISK: &[&str] = &["delivery_risk", "delivery"];
    /// Evaluation: overall score
    pub const OVERALL_SCORE: &[&str] = &["overall_score", "score", "overall"];
    /// Evaluation: commentary
    pub const EVAL_NOTES: &[&str] = &["notes", "comment", "comments"];
}

/// First candidate key present with a non-null value
pub fn pick<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

/// First candidate key whose value is truthy
pub fn pick_truthy<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| is_truthy(v)))
}

/// First truthy candidate rendered as a trimmed, non-empty string
pub fn pick_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let rendered = render_string(pick_truthy(obj, keys)?);
    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// First truthy candidate rendered as an identifier string, untrimmed
pub fn pick_id(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    pick_truthy(obj, keys).map(render_string)
}

/// First candidate key holding an array value
pub fn pick_array<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_array))
}

/// Truthiness over dynamic values: null, false, 0 and "" are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as display text; non-strings fall back to their JSON form
pub fn render_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
