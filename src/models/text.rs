//! Legacy Text Completions payload models
//!
//! The older Anthropic models on Bedrock accept a free-form prompt with
//! sampling parameters instead of a structured message list. The prompt must
//! be framed with the `\n\nHuman:` / `\n\nAssistant:` turn markers.

use crate::core::constants::{ASSISTANT_PROMPT, HUMAN_PROMPT};
use serde::{Deserialize, Serialize};

/// Text Completions request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextCompletionRequest {
    pub prompt: String,
    pub max_tokens_to_sample: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl TextCompletionRequest {
    /// Build a request from a bare prompt, adding the turn markers the
    /// legacy API requires
    pub fn from_prompt(prompt: &str, max_tokens_to_sample: u32) -> Self {
        Self {
            prompt: format!("{HUMAN_PROMPT} {prompt}{ASSISTANT_PROMPT} "),
            max_tokens_to_sample,
            temperature: None,
            top_p: None,
            top_k: None,
            stop_sequences: Some(vec![
                HUMAN_PROMPT.to_string(),
                ASSISTANT_PROMPT.to_string(),
            ]),
        }
    }
}

/// Text Completions response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextCompletionResponse {
    pub completion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
}
