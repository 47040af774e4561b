//! Configuration for the extraction workflows

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::Extractor`]
///
/// These limits govern how much caller data is embedded into prompts.
/// Timeouts and retries are a collaborator concern and live with the
/// provider, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum caller text embedded into a single prompt (characters);
    /// longer input is truncated before the collaborator sees it
    pub max_prompt_text_chars: usize,

    /// Maximum proposals serialized into one comparison prompt
    pub max_compared_proposals: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_text_chars == 0 {
            return Err("max_prompt_text_chars must be greater than 0".to_string());
        }
        if self.max_compared_proposals == 0 {
            return Err("max_compared_proposals must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Compact preset: tight prompt embedding for cheap, fast models
    pub fn compact() -> Self {
        Self {
            max_prompt_text_chars: 6_000,
            max_compared_proposals: 5,
        }
    }

    /// Generous preset: large embeds for long vendor emails and big tenders
    pub fn generous() -> Self {
        Self {
            max_prompt_text_chars: 80_000,
            max_compared_proposals: 50,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_prompt_text_chars: 20_000,
            max_compared_proposals: 20,
        }
    }
}
