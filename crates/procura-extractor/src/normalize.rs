//! Domain-specific reconciliation of parsed values
//!
//! Each normalizer accepts the untyped tree produced by lenient parsing
//! and emits one of the strongly-typed records from `procura-domain`.
//! The dynamic tree never leaks past this module.

use crate::coerce::{coerce_int, coerce_number, coerce_percent};
use crate::fields::{aliases, is_truthy, pick, pick_array, pick_id, pick_string, render_string};
use procura_domain::{
    ComparisonReport, EvaluationEntry, LineItem, NormalizedProposal, RfpItem, RfpStructure,
    DEFAULT_RFP_TITLE,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Reconcile a parsed value into a [`NormalizedProposal`]
///
/// `None` (nothing recoverable) is treated as an empty record; so is any
/// non-object value. Synonymous field names are resolved through the
/// alias tables, numbers are coerced, the line-item and record totals
/// are derived where absent, and `missing_information` lists every
/// required field that ended up empty, unless the source supplied its
/// own list.
pub fn normalize_proposal(parsed: Option<&Value>) -> NormalizedProposal {
    let empty = Map::new();
    let obj = match parsed {
        Some(value) => value.as_object().unwrap_or_else(|| {
            warn!("Proposal source is not a JSON object, treating as empty");
            &empty
        }),
        None => &empty,
    };

    let vendor_name = pick_string(obj, aliases::VENDOR_NAME);

    let line_items: Vec<LineItem> = pick_array(obj, aliases::LINE_ITEMS)
        .map(|items| items.iter().map(normalize_line_item).collect())
        .unwrap_or_default();

    let mut total_price = pick(obj, aliases::TOTAL_PRICE).and_then(coerce_number);
    if total_price.is_none() {
        let sum: f64 = line_items
            .iter()
            .map(|li| li.total_price.unwrap_or(0.0))
            .sum();
        total_price = if sum != 0.0 { Some(sum) } else { None };
    }

    let delivery_days = pick(obj, aliases::DELIVERY_DAYS)
        .and_then(coerce_int)
        .filter(|n| *n != 0);
    let warranty_months = pick(obj, aliases::WARRANTY_MONTHS)
        .and_then(coerce_int)
        .filter(|n| *n != 0);
    let payment_terms = pick_string(obj, aliases::PAYMENT_TERMS);

    let missing_information = explicit_missing(obj).unwrap_or_else(|| {
        // Truthiness of the normalized fields, so a 0 total still counts
        // as missing
        let mut missing = Vec::new();
        if vendor_name.is_none() {
            missing.push("vendor_name".to_string());
        }
        if line_items.is_empty() {
            missing.push("line_items".to_string());
        }
        if total_price.map_or(true, |t| t == 0.0) {
            missing.push("total_price".to_string());
        }
        if delivery_days.is_none() {
            missing.push("delivery_days".to_string());
        }
        if payment_terms.is_none() {
            missing.push("payment_terms".to_string());
        }
        missing
    });

    let raw = obj
        .get("raw")
        .filter(|v| is_truthy(v))
        .map(render_string);

    NormalizedProposal {
        vendor_name,
        line_items,
        total_price,
        delivery_days,
        warranty_months,
        payment_terms,
        missing_information,
        raw,
    }
}

fn normalize_line_item(raw: &Value) -> LineItem {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let name = pick_string(obj, aliases::ITEM_NAME).unwrap_or_default();
    let qty = pick(obj, aliases::ITEM_QTY)
        .and_then(coerce_number)
        .unwrap_or(0.0);
    let unit_price = pick(obj, aliases::ITEM_UNIT_PRICE).and_then(coerce_number);
    let mut total_price = pick(obj, aliases::ITEM_TOTAL).and_then(coerce_number);
    if total_price.is_none() {
        if let Some(unit) = unit_price {
            total_price = Some(unit * qty);
        }
    }
    let notes = pick_string(obj, aliases::ITEM_NOTES).unwrap_or_default();

    LineItem {
        name,
        qty,
        unit_price,
        total_price,
        notes,
    }
}

/// An explicit missing-field list in the source overrides the computed one
fn explicit_missing(obj: &Map<String, Value>) -> Option<Vec<String>> {
    let list = aliases::MISSING
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_array))?;
    Some(list.iter().map(render_string).collect())
}

/// Reconcile a parsed value into an [`RfpStructure`]
///
/// The upstream prompt constrains the shape, so no alias reconciliation
/// is needed; any subset of the expected keys may still be absent. The
/// title is never empty: source title, then `fallback_title`, then
/// [`DEFAULT_RFP_TITLE`].
pub fn normalize_rfp(parsed: Option<&Value>, fallback_title: &str) -> RfpStructure {
    let empty = Map::new();
    let obj = parsed
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let title = pick_string(obj, &["title"])
        .or_else(|| {
            let fallback = fallback_title.trim();
            if fallback.is_empty() {
                None
            } else {
                Some(fallback.to_string())
            }
        })
        .unwrap_or_else(|| DEFAULT_RFP_TITLE.to_string());

    let items = obj
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_rfp_item).collect())
        .unwrap_or_default();

    RfpStructure {
        title,
        items,
        total_budget: obj.get("total_budget").and_then(coerce_number),
        delivery_days: obj.get("delivery_days").and_then(coerce_int),
        payment_terms: pick_string(obj, &["payment_terms"]),
        warranty_months: obj.get("warranty_months").and_then(coerce_int),
        notes: pick_string(obj, &["notes"]).unwrap_or_default(),
    }
}

fn normalize_rfp_item(raw: &Value) -> RfpItem {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    RfpItem {
        name: pick_string(obj, &["name"]).unwrap_or_default(),
        quantity: obj.get("quantity").and_then(coerce_int).unwrap_or(0),
        specs: pick_string(obj, &["specs"]).unwrap_or_default(),
    }
}

/// Reconcile a parsed value into a [`ComparisonReport`]
///
/// A missing or non-array `evaluations` key yields an empty evaluation
/// list rather than a failure; identifiers are stringified and scores
/// pass through percentage coercion.
pub fn normalize_evaluations(parsed: &Value) -> ComparisonReport {
    let empty = Map::new();
    let obj = parsed.as_object().unwrap_or(&empty);

    let evaluations = obj
        .get("evaluations")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(normalize_evaluation_entry).collect())
        .unwrap_or_default();

    let recommended_proposal_id = obj
        .get("recommended_proposal_id")
        .filter(|v| is_truthy(v))
        .map(render_string);
    let explanation = obj
        .get("explanation")
        .filter(|v| is_truthy(v))
        .map(|v| render_string(v).trim().to_string());

    ComparisonReport {
        evaluations,
        recommended_proposal_id,
        explanation,
    }
}

fn normalize_evaluation_entry(raw: &Value) -> EvaluationEntry {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    EvaluationEntry {
        proposal_id: pick_id(obj, aliases::PROPOSAL_ID),
        vendor_id: pick_id(obj, aliases::VENDOR_ID),
        price_total: pick(obj, aliases::PRICE_TOTAL).and_then(coerce_number),
        spec_match_score: pick(obj, aliases::SPEC_MATCH).and_then(coerce_percent),
        delivery_risk: pick_string(obj, aliases::DELIVERY_RISK).map(|s| s.to_lowercase()),
        overall_score: pick(obj, aliases::OVERALL_SCORE).and_then(coerce_percent),
        notes: pick_string(obj, aliases::EVAL_NOTES),
    }
}
