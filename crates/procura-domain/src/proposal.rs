//! Normalized vendor proposal records

use serde::{Deserialize, Serialize};

/// A single priced line recovered from a vendor proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LineItem {
    /// Item name as the vendor stated it
    pub name: String,

    /// Quantity offered (0 when the vendor did not say)
    pub qty: f64,

    /// Price per unit, if stated
    pub unit_price: Option<f64>,

    /// Extended price for the line
    ///
    /// When the source omits it but states a unit price, this holds
    /// `unit_price * qty`.
    pub total_price: Option<f64>,

    /// Free-form notes or specs attached to the line
    pub notes: String,
}

/// A vendor's reply to an RFP after field reconciliation
///
/// Produced by the proposal normalizer from whatever shape the source
/// text carried. Fields the source did not supply are `None`, and their
/// names appear in `missing_information` so downstream review can chase
/// the vendor for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NormalizedProposal {
    /// Vendor display name
    pub vendor_name: Option<String>,

    /// Priced lines in source order
    pub line_items: Vec<LineItem>,

    /// Proposal total; sum of line totals when the source omits it
    pub total_price: Option<f64>,

    /// Promised delivery lead time in days
    pub delivery_days: Option<i64>,

    /// Warranty period in months
    pub warranty_months: Option<i64>,

    /// Payment terms as stated
    pub payment_terms: Option<String>,

    /// Names of required fields the source left empty
    pub missing_information: Vec<String>,

    /// Original raw input, attached only when extraction degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl NormalizedProposal {
    /// Sum of line totals, treating absent totals as zero
    pub fn line_items_total(&self) -> f64 {
        self.line_items
            .iter()
            .map(|li| li.total_price.unwrap_or(0.0))
            .sum()
    }
}
