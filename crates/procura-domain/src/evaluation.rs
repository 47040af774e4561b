//! Proposal comparison records

use serde::{Deserialize, Serialize};

/// One proposal's scores in a comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EvaluationEntry {
    /// Identifier of the evaluated proposal
    pub proposal_id: Option<String>,

    /// Identifier of the vendor behind the proposal
    pub vendor_id: Option<String>,

    /// Total price the evaluator attributed to the proposal
    pub price_total: Option<f64>,

    /// How well the proposal matches the brief, 0-100, 2-decimal
    pub spec_match_score: Option<f64>,

    /// Delivery risk as stated by the evaluator, lower-cased
    ///
    /// Free-form: expected values are "low"/"medium"/"high" but callers
    /// must tolerate anything the evaluator emits.
    pub delivery_risk: Option<String>,

    /// Aggregate score, 0-100, 2-decimal
    pub overall_score: Option<f64>,

    /// Evaluator commentary for this proposal
    pub notes: Option<String>,
}

/// A recovered comparison across all proposals for one RFP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComparisonReport {
    /// Per-proposal evaluations
    pub evaluations: Vec<EvaluationEntry>,

    /// Identifier of the proposal the evaluator recommends
    pub recommended_proposal_id: Option<String>,

    /// Short human-readable rationale for the recommendation
    pub explanation: Option<String>,
}

/// Outcome of a comparison workflow
///
/// Comparison results are advisory, so a silently-wrong partial report is
/// worse than a visible failure: when nothing structured can be recovered
/// the workflow returns [`ComparisonOutcome::Failed`] carrying the raw
/// collaborator output for diagnosis, never a fabricated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonOutcome {
    /// A structured comparison was recovered
    Report(ComparisonReport),

    /// No structure could be recovered at all
    Failed {
        /// What went wrong
        error: String,
        /// The unparseable collaborator output (empty when the
        /// collaborator call itself failed)
        raw: String,
    },
}

impl ComparisonOutcome {
    /// Returns the report for the success case
    pub fn report(&self) -> Option<&ComparisonReport> {
        match self {
            ComparisonOutcome::Report(report) => Some(report),
            ComparisonOutcome::Failed { .. } => None,
        }
    }

    /// Returns true when no structure was recovered
    pub fn is_failed(&self) -> bool {
        matches!(self, ComparisonOutcome::Failed { .. })
    }
}
