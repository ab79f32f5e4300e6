//! Review request models
//!
//! Defines the inbound review request schema and client-policy constants

use serde::{Deserialize, Serialize};

/// Model tier that gets the smaller input budget
pub const BASE_TIER_MODEL: &str = "gpt-3.5-turbo";

/// Maximum review input length for the base model tier (characters)
pub const MAX_INPUT_CHARS_BASE: usize = 4_000;

/// Maximum review input length for larger model tiers (characters)
pub const MAX_INPUT_CHARS_LARGE: usize = 12_000;

/// Inbound review request
///
/// Field names are camelCase on the wire; the language fields are carried
/// for client compatibility and are not used by the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Source language hint (inert pass-through)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_language: Option<String>,
    /// Target language hint (inert pass-through)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
    /// The text to review
    pub input_code: String,
    /// Upstream model identifier
    pub model: String,
    /// Per-request credential (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ReviewRequest {
    /// Per-request credential, treating an empty string like an absent field
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// Input length budget for a given model (client policy; the relay does not
/// enforce it and never truncates)
pub fn max_input_chars(model: &str) -> usize {
    if model == BASE_TIER_MODEL {
        MAX_INPUT_CHARS_BASE
    } else {
        MAX_INPUT_CHARS_LARGE
    }
}
