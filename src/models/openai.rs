//! OpenAI API data models
//!
//! Defines the chat completions request body and the streamed chunk shapes

use serde::{Deserialize, Serialize};

/// Chat completions request body
///
/// The relay always issues the same call shape: one system message,
/// deterministic sampling, streaming enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name
    pub model: String,
    /// Message list
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (fixed at 0 for review output)
    pub temperature: f32,
    /// Whether to stream the response
    pub stream: bool,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatCompletionRequest {
    /// Build a deterministic streaming request carrying one system message
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system_prompt)],
            temperature: 0.0,
            stream: true,
        }
    }
}

impl ChatMessage {
    /// Create a system-role message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// One streamed chat completion chunk
///
/// Only `choices` is required: upstream payloads may omit the id/object
/// metadata, and minimal chunks must still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    /// Response ID (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// Creation timestamp (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    /// Model echo (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Choice list
    pub choices: Vec<ChunkChoice>,
}

/// One choice within a streamed chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Incremental delta
    pub delta: ChunkDelta,
    /// Finish reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Incremental delta carried by a streamed choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkDelta {
    /// Role (present on the first delta only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content fragment (absent on role-only and final deltas)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
