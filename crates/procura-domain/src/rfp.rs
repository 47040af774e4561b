//! Structured procurement brief records

use serde::{Deserialize, Serialize};

/// Title used when neither the source text nor the caller supplies one
pub const DEFAULT_RFP_TITLE: &str = "Untitled RFP";

/// A single requested item in a procurement brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RfpItem {
    /// What is being procured
    pub name: String,

    /// How many units are requested (0 when unstated)
    pub quantity: i64,

    /// Technical or commercial specifications for the item
    pub specs: String,
}

/// A procurement brief recovered from natural-language text
///
/// `title` is always non-empty: the structuring workflow falls back to a
/// caller-supplied title and finally to [`DEFAULT_RFP_TITLE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RfpStructure {
    /// Short human-readable title
    pub title: String,

    /// Requested items
    pub items: Vec<RfpItem>,

    /// Overall budget ceiling, if stated
    pub total_budget: Option<f64>,

    /// Required delivery lead time in days
    pub delivery_days: Option<i64>,

    /// Required payment terms
    pub payment_terms: Option<String>,

    /// Required warranty period in months
    pub warranty_months: Option<i64>,

    /// Anything that did not fit the fields above; degraded extractions
    /// carry the original request text here
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let rfp = RfpStructure {
            title: "Office chairs".to_string(),
            items: vec![RfpItem {
                name: "Ergonomic chair".to_string(),
                quantity: 25,
                specs: "adjustable lumbar support".to_string(),
            }],
            total_budget: Some(12_500.0),
            delivery_days: Some(30),
            payment_terms: Some("net 30".to_string()),
            warranty_months: Some(24),
            notes: String::new(),
        };

        let json = serde_json::to_string(&rfp).unwrap();
        let back: RfpStructure = serde_json::from_str(&json).unwrap();
        assert_eq!(rfp, back);
    }
}
