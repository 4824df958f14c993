//! Request and response payload models for the Bedrock runtime

pub mod messages;
pub mod text;
