//! Anthropic Messages API payload models
//!
//! This module defines the request and response structures for the Messages
//! format accepted by the Bedrock runtime `InvokeModel` operation, including
//! the mandatory `anthropic_version` tag.

use crate::core::constants::{self, content, role};
use serde::{Deserialize, Serialize};

/// Text content block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ContentBlock {
    /// Build a text content block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: content::TEXT.to_string(),
            text: text.into(),
        }
    }
}

/// Message with role and content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(with = "message_content")]
    pub content: MessageContent,
}

impl Message {
    /// Build a user message holding a single text block
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: role::USER.to_string(),
            content: MessageContent::Blocks(vec![ContentBlock::text(text)]),
        }
    }
}

/// Message content can be a string or array of content blocks
#[derive(Debug, Clone)]
pub enum MessageContent {
    String(String),
    Blocks(Vec<ContentBlock>),
}

mod message_content {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(content: &MessageContent, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match content {
            MessageContent::String(s) => serializer.serialize_str(s),
            MessageContent::Blocks(b) => b.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<MessageContent, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: serde_json::Value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Ok(MessageContent::String(s)),
            serde_json::Value::Array(_) => {
                let blocks: Vec<ContentBlock> =
                    serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                Ok(MessageContent::Blocks(blocks))
            }
            _ => Err(serde::de::Error::custom("Invalid message content")),
        }
    }
}

/// Messages API request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl MessagesRequest {
    /// Build a single-turn request from a user prompt
    pub fn from_prompt(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            anthropic_version: constants::ANTHROPIC_VERSION.to_string(),
            max_tokens,
            messages: vec![Message::user(prompt)],
            system: None,
            temperature: None,
            top_p: None,
            top_k: None,
            stop_sequences: None,
        }
    }
}

/// Token-usage counters returned with every Messages response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Messages API response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub model: String,
    pub role: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<String>,
    pub usage: Usage,
}

impl MessagesResponse {
    /// Text of every content block, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(|block| block.text.as_str())
    }
}
