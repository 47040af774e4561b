//! Procura Domain Layer
//!
//! This crate contains the core record types for procurement workflows.
//! It defines the value objects produced by the extraction engine and the
//! trait interface for the text-generation collaborator that other layers
//! implement.
//!
//! ## Key Concepts
//!
//! - **RfpStructure**: a procurement brief recovered from natural language
//! - **NormalizedProposal**: a vendor reply after field reconciliation
//! - **ComparisonOutcome**: a multi-proposal evaluation, or an explicit
//!   failure record when nothing could be recovered
//!
//! ## Architecture
//!
//! Every record is a plain value type: created fresh per extraction call,
//! never mutated after construction, and owned exclusively by the caller
//! that receives it. Infrastructure implementations (HTTP providers,
//! mocks) live in other crates and plug in through [`traits::TextGenerator`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evaluation;
pub mod proposal;
pub mod rfp;
pub mod traits;

// Re-exports for convenience
pub use evaluation::{ComparisonOutcome, ComparisonReport, EvaluationEntry};
pub use proposal::{LineItem, NormalizedProposal};
pub use rfp::{RfpItem, RfpStructure, DEFAULT_RFP_TITLE};
