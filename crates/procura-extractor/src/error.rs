//! Error types for the extraction engine

use thiserror::Error;

/// Failures absorbed inside the extraction workflows
///
/// These never escape to workflow callers. They select the degraded
/// fallback record and, for comparisons, supply the text of the explicit
/// failure result.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The text-generation collaborator call failed
    #[error("generation failed: {0}")]
    Generation(String),

    /// No JSON-like structure could be recovered, even after repair
    #[error("no recoverable structure in response")]
    NoStructure,
}
