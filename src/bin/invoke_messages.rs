//! Messages API invocation
//!
//! Sends the configured prompt to a Bedrock runtime endpoint using the
//! Anthropic Messages format and prints the token usage and returned text.

use bedrock_invoke::core::client::BedrockClient;
use bedrock_invoke::core::config::Config;
use bedrock_invoke::core::logging::init_logging;
use bedrock_invoke::models::messages::{MessagesRequest, MessagesResponse};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    info!(
        "Invoking {} at {} (region {})",
        config.model_id, config.endpoint_url, config.region
    );

    let credential = config.has_credentials().then(|| config.access_key_id.clone());
    let client = match BedrockClient::new(
        config.endpoint_url.clone(),
        credential,
        config.timeout,
        config.verify_tls,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            std::process::exit(1);
        }
    };

    let mut request = MessagesRequest::from_prompt(&config.prompt, config.max_tokens);
    request.temperature = config.temperature;
    request.top_p = config.top_p;
    request.top_k = config.top_k;
    request.stop_sequences = config.stop_sequences.clone();

    match client.invoke(&config.model_id, &request).await {
        Ok(response) => print_invocation_details(&response),
        Err(e) => {
            error!("Invocation failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print token usage and each returned text block
fn print_invocation_details(response: &MessagesResponse) {
    println!("Invocation details:");
    println!("- The input length is {} tokens.", response.usage.input_tokens);
    println!("- The output length is {} tokens.", response.usage.output_tokens);

    println!("- The model returned {} response(s):", response.content.len());
    for text in response.texts() {
        println!("{}", text);
    }
}

/// Print help message
fn print_help() {
    println!("invoke-messages - single-shot Messages API invocation");
    println!();
    println!("Usage: invoke-messages [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Configuration is read from config.toml (override with CONFIG_PATH):");
    println!();
    println!("  [endpoint]");
    println!("  url = \"https://...\"        Bedrock runtime or gateway URL (required)");
    println!("  region = \"us-west-2\"       Endpoint region");
    println!("  model_id = \"...\"           Model identifier (required)");
    println!("  verify_tls = true          Set false for self-signed gateway certs");
    println!();
    println!("  [credentials]");
    println!("  access_key_id / secret_access_key - static credentials; the");
    println!("  AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY environment variables");
    println!("  take precedence (a .env file is honored)");
    println!();
    println!("  [request]");
    println!("  max_tokens = 1024          Token limit for the response");
    println!("  timeout = 60               Request timeout in seconds");
    println!("  prompt = \"hello\"           Prompt text to send");
    println!("  temperature / top_p / top_k / stop_sequences - optional sampling");
    println!();
    println!("  log_level = \"info\"         Logging level");
}
