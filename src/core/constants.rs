//! Constants for the Bedrock runtime wire format
//!
//! This module defines string constants used throughout the application for
//! the Anthropic version tag, message roles, content types, and stop reasons.

/// Version tag required in every Messages API request body
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Turn prefix for the human side of a legacy text-completion prompt
pub const HUMAN_PROMPT: &str = "\n\nHuman:";

/// Turn prefix for the assistant side of a legacy text-completion prompt
pub const ASSISTANT_PROMPT: &str = "\n\nAssistant:";

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";

    /// Assistant role identifier
    pub const ASSISTANT: &str = "assistant";
}

/// Content type constants
pub mod content {
    /// Text content type
    pub const TEXT: &str = "text";
}

/// Stop reason constants
pub mod stop {
    /// End turn stop reason
    pub const END_TURN: &str = "end_turn";

    /// Max tokens stop reason
    pub const MAX_TOKENS: &str = "max_tokens";

    /// Stop sequence stop reason
    pub const STOP_SEQUENCE: &str = "stop_sequence";
}
