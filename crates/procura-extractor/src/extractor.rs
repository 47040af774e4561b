//! Workflow implementations over an injected text-generation collaborator

use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::lenient::parse_lenient;
use crate::normalize::{normalize_evaluations, normalize_proposal, normalize_rfp};
use crate::prompt;
use crate::repair::clean_model_output;
use procura_domain::traits::TextGenerator;
use procura_domain::{ComparisonOutcome, NormalizedProposal, RfpStructure};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, warn};

/// Input accepted by [`Extractor::parse_proposal`]
///
/// Inbound webhook payloads sometimes arrive pre-parsed; free text comes
/// from email bodies and manual paste.
#[derive(Debug, Clone)]
pub enum ProposalInput {
    /// Free-form reply text
    Text(String),

    /// An already-structured value, normalized without any parsing
    Structured(Value),
}

impl From<String> for ProposalInput {
    fn from(text: String) -> Self {
        ProposalInput::Text(text)
    }
}

impl From<&str> for ProposalInput {
    fn from(text: &str) -> Self {
        ProposalInput::Text(text.to_string())
    }
}

impl From<Value> for ProposalInput {
    fn from(value: Value) -> Self {
        ProposalInput::Structured(value)
    }
}

/// The Extractor recovers structured procurement records from untrusted text
///
/// Every workflow resolves to a fully-formed record: extraction and
/// collaborator failures are absorbed into degraded results that keep
/// the original input for downstream diagnosis. `compare_proposals` is
/// the one exception, surfacing an explicit failure value instead of a
/// fabricated partial comparison.
pub struct Extractor<G>
where
    G: TextGenerator,
{
    generator: Arc<G>,
    config: ExtractorConfig,
}

impl<G> Extractor<G>
where
    G: TextGenerator + Send + Sync + 'static,
    G::Error: std::fmt::Display,
{
    /// Create a new Extractor around a text-generation collaborator
    pub fn new(generator: G, config: ExtractorConfig) -> Self {
        Self {
            generator: Arc::new(generator),
            config,
        }
    }

    /// Structure a natural-language procurement request into an RFP
    ///
    /// Never fails: when the collaborator errors or returns nothing
    /// parseable, the result is a minimal structure titled from
    /// `fallback_title` that carries the original text in `notes`.
    pub async fn structure_rfp(&self, natural_text: &str, fallback_title: &str) -> RfpStructure {
        info!(
            "Structuring RFP from {} chars of request text",
            natural_text.len()
        );

        let prompt = prompt::rfp_structure_prompt(self.clip(natural_text));
        match self.generate_value(&prompt).await {
            Ok(parsed) => normalize_rfp(Some(&parsed), fallback_title),
            Err(e) => {
                warn!("RFP structuring degraded to notes-only record: {}", e);
                let mut rfp = normalize_rfp(None, fallback_title);
                rfp.notes = natural_text.to_string();
                rfp
            }
        }
    }

    /// Parse a vendor proposal from text or a pre-structured value
    ///
    /// Never fails. Text input is parsed locally first; the collaborator
    /// is consulted only when local recovery fails, and on total failure
    /// the result is a record whose `raw` field holds the original
    /// input.
    pub async fn parse_proposal(&self, input: impl Into<ProposalInput>) -> NormalizedProposal {
        match input.into() {
            ProposalInput::Structured(value) => {
                debug!("Normalizing pre-structured proposal input");
                normalize_proposal(Some(&value))
            }
            ProposalInput::Text(text) => self.parse_proposal_text(&text).await,
        }
    }

    async fn parse_proposal_text(&self, text: &str) -> NormalizedProposal {
        // Well-formed machine replies parse locally without spending a
        // generation call
        if let Some(parsed) = parse_lenient(text) {
            debug!("Proposal parsed locally, no generation call needed");
            return normalize_proposal(Some(&parsed));
        }

        info!("Local parse failed, consulting text generation");
        let prompt = prompt::proposal_extraction_prompt(self.clip(text));
        match self.generate_value(&prompt).await {
            Ok(parsed) => normalize_proposal(Some(&parsed)),
            Err(e) => {
                warn!("Proposal extraction degraded to raw record: {}", e);
                normalize_proposal(Some(&json!({ "raw": text })))
            }
        }
    }

    /// Compare proposals against an RFP
    ///
    /// Returns [`ComparisonOutcome::Failed`] when the collaborator errors
    /// or its output contains no recoverable structure; comparison data
    /// is advisory, and an explicit failure beats a silently-wrong
    /// partial report.
    pub async fn compare_proposals(
        &self,
        rfp: &RfpStructure,
        proposals: &[NormalizedProposal],
    ) -> ComparisonOutcome {
        let batch = if proposals.len() > self.config.max_compared_proposals {
            warn!(
                "Comparing only the first {} of {} proposals",
                self.config.max_compared_proposals,
                proposals.len()
            );
            &proposals[..self.config.max_compared_proposals]
        } else {
            proposals
        };

        info!("Comparing {} proposals for '{}'", batch.len(), rfp.title);
        let prompt = prompt::comparison_prompt(rfp, batch);

        let raw = match self.call_generator(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Comparison failed before parsing: {}", e);
                return ComparisonOutcome::Failed {
                    error: e.to_string(),
                    raw: String::new(),
                };
            }
        };

        let cleaned = clean_model_output(&raw);
        match parse_lenient(&cleaned) {
            Some(parsed) => ComparisonOutcome::Report(normalize_evaluations(&parsed)),
            None => {
                warn!("Comparison output had no recoverable structure");
                ComparisonOutcome::Failed {
                    error: "failed to parse AI output".to_string(),
                    raw,
                }
            }
        }
    }

    /// Call the collaborator and leniently parse its reply
    async fn generate_value(&self, prompt: &str) -> Result<Value, ExtractError> {
        let response = self.call_generator(prompt).await?;
        debug!("Generation response length: {} chars", response.len());
        parse_lenient(&response).ok_or(ExtractError::NoStructure)
    }

    /// Call the text-generation collaborator
    async fn call_generator(&self, prompt: &str) -> Result<String, ExtractError> {
        let generator = Arc::clone(&self.generator);
        let prompt = prompt.to_string();

        // The TextGenerator trait is sync; run it off the async executor
        task::spawn_blocking(move || {
            generator
                .generate(&prompt)
                .map_err(|e| ExtractError::Generation(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Generation(format!("Task join error: {}", e)))?
    }

    fn clip<'a>(&self, text: &'a str) -> &'a str {
        let clipped = prompt::truncate_chars(text, self.config.max_prompt_text_chars);
        if clipped.len() < text.len() {
            debug!(
                "Prompt text truncated from {} to {} chars",
                text.len(),
                clipped.len()
            );
        }
        clipped
    }
}
