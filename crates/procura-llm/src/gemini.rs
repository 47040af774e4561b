//! Gemini Provider Implementation
//!
//! Integration with the Google Generative Language REST API.
//!
//! # Features
//!
//! - Async HTTP communication with the `generateContent` endpoint
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use procura_llm::GeminiClient;
//!
//! // Create a Gemini client (API key usually comes from GEMINI_API_KEY)
//! let client = GeminiClient::new("api-key", "gemini-2.5-flash");
//!
//! // Note: the generate method is async; use the TextGenerator trait's
//! // sync wrapper outside of an async context
//! ```

use crate::GenerationError;
use procura_domain::traits::TextGenerator as TextGeneratorTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model when the caller does not pick one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for generation requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Gemini API client for hosted text generation
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the generateContent API
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Response from the generateContent API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Pull the generated text out of the nested candidates -> content ->
    /// parts shape. Multiple parts are concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        )
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Parameters
    ///
    /// - `api_key`: Generative Language API key
    /// - `model`: model to use (e.g., "gemini-2.5-flash")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a client for the default model
    pub fn default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Override the API endpoint (useful for proxies and tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate text for a prompt
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the network request fails after all retries
    /// - the model is not available (HTTP 404)
    /// - the quota is exhausted (HTTP 429)
    /// - the response carries no text
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        // Retry loop with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<GenerateContentResponse>().await {
                            Ok(body) => body.text().ok_or_else(|| {
                                GenerationError::InvalidResponse(
                                    "response carried no candidate text".to_string(),
                                )
                            }),
                            Err(e) => Err(GenerationError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(GenerationError::ModelNotAvailable(self.model.clone()));
                    } else if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        return Err(GenerationError::RateLimitExceeded);
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(GenerationError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(GenerationError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| GenerationError::Communication("Max retries exceeded".to_string())))
    }
}

impl TextGeneratorTrait for GeminiClient {
    type Error = GenerationError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for the async call
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.generate(prompt).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new("key", "gemini-2.5-flash");
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model, "gemini-2.5-flash");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_gemini_client_default_model() {
        let client = GeminiClient::default_model("key");
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_gemini_client_builders() {
        let client = GeminiClient::new("key", "gemini-2.5-flash")
            .with_endpoint("http://localhost:8080")
            .with_max_retries(5);
        assert_eq!(client.endpoint, "http://localhost:8080");
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello "}, {"text": "world"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().unwrap(), "hello world");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        // Unroutable endpoint to trigger a communication error
        let client = GeminiClient::new("key", "gemini-2.5-flash")
            .with_endpoint("http://127.0.0.1:1")
            .with_max_retries(1);

        let result = client.generate("test").await;
        assert!(result.is_err());

        match result {
            Err(GenerationError::Communication(_)) => {}
            _ => panic!("Expected Communication error"),
        }
    }

    // Integration test (requires a real API key)
    #[tokio::test]
    #[ignore] // Only run when GEMINI_API_KEY is set
    async fn test_gemini_generate_integration() {
        let Ok(api_key) = std::env::var("GEMINI_API_KEY") else {
            return;
        };
        let client = GeminiClient::default_model(api_key);
        let result = client.generate("Say 'hello' and nothing else").await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}
