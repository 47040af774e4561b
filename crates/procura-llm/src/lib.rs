//! Procura Text-Generation Provider Layer
//!
//! Pluggable implementations of the `TextGenerator` trait from
//! `procura-domain`.
//!
//! # Providers
//!
//! - `MockGenerator`: deterministic mock for testing
//! - `GeminiClient`: Google Generative Language API integration
//!
//! # Examples
//!
//! ```
//! use procura_llm::MockGenerator;
//! use procura_domain::traits::TextGenerator;
//!
//! let generator = MockGenerator::new("{\"title\": \"Chairs\"}");
//! let result = generator.generate("structure this request").unwrap();
//! assert_eq!(result, "{\"title\": \"Chairs\"}");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use procura_domain::traits::TextGenerator as TextGeneratorTrait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiClient;

/// Errors that can occur during text generation
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response arrived but carried no usable text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Generation error: {0}")]
    Other(String),
}

/// Mock generator for deterministic testing
///
/// Returns pre-configured responses without any network calls. Responses
/// can be keyed on a substring of the prompt, which suits extraction
/// prompts that embed caller text of unpredictable length.
///
/// # Examples
///
/// ```
/// use procura_llm::MockGenerator;
/// use procura_domain::traits::TextGenerator;
///
/// let mut generator = MockGenerator::new("{}");
/// generator.add_response("vendor email", "{\"vendor_name\": \"Acme\"}");
///
/// assert_eq!(generator.generate("parse this vendor email").unwrap(),
///            "{\"vendor_name\": \"Acme\"}");
/// assert_eq!(generator.generate("anything else").unwrap(), "{}");
/// assert_eq!(generator.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_response: Option<String>,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerator {
    /// Create a mock that returns a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every call fails with a generation error
    pub fn failing() -> Self {
        Self {
            default_response: None,
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a response returned when the prompt contains `needle`
    ///
    /// Needles are checked in insertion order; the first match wins.
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), response.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGeneratorTrait for MockGenerator {
    type Error = GenerationError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        for (needle, response) in responses.iter() {
            if prompt.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(GenerationError::Other("Mock generator error".to_string())),
        }
    }
}
