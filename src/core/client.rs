//! Bedrock runtime HTTP client
//!
//! This module provides an async HTTP client for the Bedrock runtime
//! `InvokeModel` operation. It posts a JSON body to the runtime's REST path
//! and parses the returned payload. TLS certificate verification can be
//! disabled for self-signed gateway endpoints.

use crate::models::messages::{MessagesRequest, MessagesResponse};
use crate::models::text::{TextCompletionRequest, TextCompletionResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Error types that can occur during a model invocation
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Async client for a Bedrock runtime endpoint
pub struct BedrockClient {
    client: Client,
    endpoint_url: String,
    credential: Option<String>,
}

impl BedrockClient {
    /// Create a new Bedrock runtime client
    ///
    /// # Arguments
    ///
    /// * `endpoint_url` - Runtime or gateway base URL
    /// * `credential` - Static credential presented as a bearer token, if any
    /// * `timeout` - Request timeout in seconds
    /// * `verify_tls` - Whether to verify the endpoint's TLS certificate
    ///
    /// # Errors
    ///
    /// Returns `InvokeError::Unexpected` if the HTTP client cannot be built.
    pub fn new(
        endpoint_url: String,
        credential: Option<String>,
        timeout: u64,
        verify_tls: bool,
    ) -> Result<Self, InvokeError> {
        if !verify_tls {
            warn!("TLS certificate verification is disabled for {}", endpoint_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| InvokeError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
            credential: credential.filter(|c| !c.is_empty()),
        })
    }

    /// Invoke a model with a Messages API request
    ///
    /// # Errors
    ///
    /// Returns `InvokeError` for transport failures, non-2xx responses, and
    /// unparseable payloads.
    pub async fn invoke(
        &self,
        model_id: &str,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, InvokeError> {
        self.send_invoke(model_id, request).await
    }

    /// Invoke a model with a legacy Text Completions request
    ///
    /// # Errors
    ///
    /// Returns `InvokeError` for transport failures, non-2xx responses, and
    /// unparseable payloads.
    pub async fn invoke_text(
        &self,
        model_id: &str,
        request: &TextCompletionRequest,
    ) -> Result<TextCompletionResponse, InvokeError> {
        self.send_invoke(model_id, request).await
    }

    /// Build the InvokeModel URL for a model id
    fn invoke_url(&self, model_id: &str) -> String {
        format!("{}/model/{}/invoke", self.endpoint_url, model_id)
    }

    /// Map a non-2xx status code to the matching error variant
    fn error_for_status(status: u16, message: String) -> InvokeError {
        match status {
            401 | 403 => InvokeError::Authentication(message),
            429 => InvokeError::Throttled(message),
            400 | 404 => InvokeError::BadRequest(message),
            _ => InvokeError::ApiError { status, message },
        }
    }

    /// Classify Bedrock errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("accessdeniedexception")
            || error_lower.contains("unrecognizedclientexception")
        {
            return "Access denied. Check your credentials and model access grants.".to_string();
        }

        if error_lower.contains("expiredtokenexception") {
            return "Credentials have expired. Refresh your access keys.".to_string();
        }

        if error_lower.contains("throttlingexception") {
            return "Request was throttled. Wait and try again, or request a quota increase."
                .to_string();
        }

        if error_lower.contains("resourcenotfoundexception") {
            return "Model not found. Check the configured model_id and region.".to_string();
        }

        if error_lower.contains("validationexception") {
            return format!("Request body was rejected by the runtime: {error_detail}");
        }

        error_detail.to_string()
    }

    /// Internal method to send an InvokeModel request
    async fn send_invoke<B, R>(&self, model_id: &str, body: &B) -> Result<R, InvokeError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.invoke_url(model_id);
        debug!("POST {}", url);

        let mut req_builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(ref credential) = self.credential {
            req_builder = req_builder.bearer_auth(credential);
        }

        let response = req_builder
            .json(body)
            .send()
            .await
            .map_err(|e| InvokeError::Unexpected(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let classified_error = Self::classify_error(&error_text);

            return Err(Self::error_for_status(status.as_u16(), classified_error));
        }

        response
            .json()
            .await
            .map_err(|e| InvokeError::Unexpected(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> BedrockClient {
        BedrockClient::new(
            "https://bedrock-gw.example.com/".to_string(),
            None,
            60,
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_invoke_url_strips_trailing_slash() {
        let client = test_client();
        assert_eq!(
            client.invoke_url("anthropic.claude-3-5-sonnet-20241022-v2:0"),
            "https://bedrock-gw.example.com/model/anthropic.claude-3-5-sonnet-20241022-v2:0/invoke"
        );
    }

    #[test]
    fn test_empty_credential_is_dropped() {
        let client = BedrockClient::new(
            "https://bedrock-gw.example.com".to_string(),
            Some(String::new()),
            60,
            true,
        )
        .unwrap();
        assert!(client.credential.is_none());
    }

    #[test]
    fn test_error_for_status_auth_variants() {
        for status in [401, 403] {
            let error = BedrockClient::error_for_status(status, "denied".to_string());
            assert!(matches!(error, InvokeError::Authentication(_)), "status {status}");
        }
    }

    #[test]
    fn test_error_for_status_throttled() {
        let error = BedrockClient::error_for_status(429, "slow down".to_string());
        assert!(matches!(error, InvokeError::Throttled(_)));
    }

    #[test]
    fn test_error_for_status_bad_request_variants() {
        for status in [400, 404] {
            let error = BedrockClient::error_for_status(status, "rejected".to_string());
            assert!(matches!(error, InvokeError::BadRequest(_)), "status {status}");
        }
    }

    #[test]
    fn test_error_for_status_other_keeps_status() {
        let error = BedrockClient::error_for_status(503, "unavailable".to_string());
        match error {
            InvokeError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_access_denied() {
        let error = r#"{"message":"AccessDeniedException: not authorized"}"#;
        let result = BedrockClient::classify_error(error);
        assert!(result.contains("Access denied"));
    }

    #[test]
    fn test_classify_throttling() {
        let error = "ThrottlingException: Too many requests";
        let result = BedrockClient::classify_error(error);
        assert!(result.contains("throttled"));
    }

    #[test]
    fn test_classify_model_not_found() {
        let error = "ResourceNotFoundException: Could not resolve the foundation model";
        let result = BedrockClient::classify_error(error);
        assert!(result.contains("model_id"));
    }

    #[test]
    fn test_classify_passes_through_unknown_errors() {
        let error = "connection reset by peer";
        assert_eq!(BedrockClient::classify_error(error), error);
    }
}
