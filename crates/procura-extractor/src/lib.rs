//! Procura Extractor
//!
//! Recovers structured procurement records from untrusted free-form text.
//!
//! # Overview
//!
//! Replies from vendors and answers from the text-generation service
//! arrive as arbitrary strings: JSON wrapped in code fences, trailing
//! commas, smart quotes, comments, partial JSON, or prose surrounding a
//! payload. This crate locates a JSON-like value inside that text,
//! repairs common malformations, and reconciles the result into the
//! typed records of `procura-domain`.
//!
//! # Architecture
//!
//! ```text
//! Text → BalancedExtraction → Repair → LenientParse → Normalize → Record
//! ```
//!
//! Workflows sit on top and guarantee a result: extraction and
//! collaborator failures degrade into minimal records that preserve the
//! original input, instead of propagating errors.
//!
//! # Key Features
//!
//! - **Balanced extraction**: find a JSON value inside prose without
//!   tripping over braces inside string values
//! - **Lenient parsing**: a strict-first ladder of repairs for common
//!   generation artifacts
//! - **Field reconciliation**: synonymous field names resolved through
//!   explicit alias tables, numbers coerced from messy strings
//! - **Injected collaborator**: any `TextGenerator` implementation plugs
//!   in, so tests run on a deterministic mock
//!
//! # Example Usage
//!
//! ```no_run
//! use procura_extractor::{Extractor, ExtractorConfig};
//! use procura_llm::MockGenerator;
//!
//! # async fn example() {
//! let generator = MockGenerator::new(r#"{"title": "Office chairs"}"#);
//! let extractor = Extractor::new(generator, ExtractorConfig::default());
//!
//! let rfp = extractor
//!     .structure_rfp("We need 25 ergonomic chairs by next month", "Chairs")
//!     .await;
//! assert_eq!(rfp.title, "Office chairs");
//!
//! let proposal = extractor
//!     .parse_proposal(r#"{"vendor": "Acme", "total": 4500}"#)
//!     .await;
//! assert_eq!(proposal.total_price, Some(4500.0));
//! # }
//! ```

#![warn(missing_docs)]

mod balanced;
mod coerce;
mod config;
mod error;
mod extractor;
mod fields;
mod lenient;
mod normalize;
mod prompt;
mod repair;

#[cfg(test)]
mod tests;

pub use balanced::extract_balanced;
pub use coerce::{coerce_int, coerce_number, coerce_percent};
pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use extractor::{Extractor, ProposalInput};
pub use lenient::parse_lenient;
pub use normalize::{normalize_evaluations, normalize_proposal, normalize_rfp};
pub use repair::clean_model_output;
