//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! All configuration is validated at startup so a misconfigured invocation
//! fails before any request is sent.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default token limit for a single invocation
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 60;

/// Default region for the Bedrock runtime
const DEFAULT_REGION: &str = "us-west-2";

/// Default prompt sent when none is configured
const DEFAULT_PROMPT: &str = "hello";

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub model_id: String,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_request_timeout")]
    pub timeout: u64,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub top_k: Option<u32>,
    #[serde(default)]
    pub stop_sequences: Option<Vec<String>>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            prompt: DEFAULT_PROMPT.to_string(),
            temperature: None,
            top_p: None,
            top_k: None,
            stop_sequences: None,
        }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_verify_tls() -> bool {
    true
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Application configuration loaded from a TOML file
///
/// Static credentials may be overridden through the `AWS_ACCESS_KEY_ID` and
/// `AWS_SECRET_ACCESS_KEY` environment variables (a `.env` file is honored).
#[derive(Debug, Clone)]
pub struct Config {
    /// Bedrock runtime endpoint URL (or a gateway fronting one)
    pub endpoint_url: String,

    /// Region the endpoint serves
    pub region: String,

    /// Model identifier passed in the invocation path
    pub model_id: String,

    /// Whether to verify the endpoint's TLS certificate
    pub verify_tls: bool,

    /// Static access key id
    pub access_key_id: String,

    /// Static secret access key
    pub secret_access_key: String,

    /// Token limit for the invocation
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Prompt text to send
    pub prompt: String,

    /// Optional sampling temperature
    pub temperature: Option<f32>,

    /// Optional nucleus sampling parameter
    pub top_p: Option<f32>,

    /// Optional top-k sampling parameter
    pub top_k: Option<u32>,

    /// Optional stop sequences
    pub stop_sequences: Option<Vec<String>>,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TOML file cannot be read or parsed
    /// - The endpoint URL is not an http(s) URL
    /// - Token limit or timeout is zero
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
            .unwrap_or(config.credentials.access_key_id);
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
            .unwrap_or(config.credentials.secret_access_key);

        let config = Config {
            endpoint_url: config.endpoint.url,
            region: config.endpoint.region,
            model_id: config.endpoint.model_id,
            verify_tls: config.endpoint.verify_tls,
            access_key_id,
            secret_access_key,
            max_tokens: config.request.max_tokens,
            timeout: config.request.timeout,
            prompt: config.request.prompt,
            temperature: config.request.temperature,
            top_p: config.request.top_p,
            top_k: config.request.top_k,
            stop_sequences: config.request.stop_sequences,
            log_level: config.log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the path named by `CONFIG_PATH`
    ///
    /// Looks for config.toml in the current directory by default.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::from_file(config_path)
    }

    fn validate(&self) -> Result<()> {
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            bail!("endpoint.url must be an http(s) URL: {}", self.endpoint_url);
        }
        if self.model_id.is_empty() {
            bail!("endpoint.model_id must not be empty");
        }
        if self.max_tokens == 0 {
            bail!("request.max_tokens must be at least 1");
        }
        if self.timeout == 0 {
            bail!("request.timeout must be at least 1 second");
        }
        Ok(())
    }

    /// Whether a static credential was supplied
    ///
    /// The gateway deployments this tool targets accept unauthenticated
    /// requests when no credential is configured.
    pub fn has_credentials(&self) -> bool {
        !self.access_key_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            log_level = "info"

            [endpoint]
            url = "https://bedrock-gw.example.elb.us-west-2.amazonaws.com"
            region = "us-west-2"
            model_id = "anthropic.claude-3-5-sonnet-20241022-v2:0"
            verify_tls = false

            [credentials]
            access_key_id = "AKIATEST"
            secret_access_key = "secret"

            [request]
            max_tokens = 1024
            timeout = 60
            prompt = "hello"
        "#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = create_test_config();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(
            config.endpoint_url,
            "https://bedrock-gw.example.elb.us-west-2.amazonaws.com"
        );
        assert_eq!(config.model_id, "anthropic.claude-3-5-sonnet-20241022-v2:0");
        assert!(!config.verify_tls);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.prompt, "hello");
        assert!(config.has_credentials());
    }

    #[test]
    fn test_defaults_applied() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [endpoint]
            url = "https://bedrock-runtime.us-west-2.amazonaws.com"
            model_id = "anthropic.claude-v2"
        "#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.region, "us-west-2");
        assert!(config.verify_tls);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.timeout, 60);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_vars_override_credentials() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [endpoint]
            url = "https://bedrock-runtime.us-west-2.amazonaws.com"
            model_id = "anthropic.claude-v2"

            [credentials]
            access_key_id = "AKIAFROMFILE"
            secret_access_key = "file-secret"
        "#
        )
        .unwrap();
        file.flush().unwrap();

        unsafe {
            std::env::set_var("AWS_ACCESS_KEY_ID", "AKIAFROMENV");
            std::env::set_var("AWS_SECRET_ACCESS_KEY", "env-secret");
        }
        let config = Config::from_file(file.path()).unwrap();
        unsafe {
            std::env::remove_var("AWS_ACCESS_KEY_ID");
            std::env::remove_var("AWS_SECRET_ACCESS_KEY");
        }

        assert_eq!(config.access_key_id, "AKIAFROMENV");
        assert_eq!(config.secret_access_key, "env-secret");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [endpoint]
            url = "ftp://example.com"
            model_id = "anthropic.claude-v2"
        "#
        )
        .unwrap();
        file.flush().unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_rejects_zero_max_tokens() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [endpoint]
            url = "https://example.com"
            model_id = "anthropic.claude-v2"

            [request]
            max_tokens = 0
        "#
        )
        .unwrap();
        file.flush().unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }
}
