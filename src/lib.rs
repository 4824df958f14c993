//! Bedrock runtime invocation client
//!
//! This crate sends single-shot model invocations to an Amazon Bedrock
//! runtime endpoint (or a gateway fronting one) and parses the returned
//! payload. Two request shapes are supported: the Anthropic Messages format
//! and the legacy Text Completions format.

pub mod core;
pub mod models;
