//! Legacy Text Completions invocation
//!
//! Sends the configured prompt to a Bedrock runtime endpoint using the older
//! free-text prompt format and prints the completion.

use bedrock_invoke::core::client::BedrockClient;
use bedrock_invoke::core::config::Config;
use bedrock_invoke::core::logging::init_logging;
use bedrock_invoke::models::text::{TextCompletionRequest, TextCompletionResponse};
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

    let mut request = TextCompletionRequest::from_prompt(&config.prompt, config.max_tokens);
    request.temperature = config.temperature;
    request.top_p = config.top_p;
    request.top_k = config.top_k;
    if let Some(ref stops) = config.stop_sequences {
        request.stop_sequences = Some(stops.clone());
    }

    match client.invoke_text(&config.model_id, &request).await {
        Ok(response) => print!("{}", format_completion(&response)),
        Err(e) => {
            error!("Invocation failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Render the completion and stop reason, keeping the model output verbatim
fn format_completion(response: &TextCompletionResponse) -> String {
    let mut out = format!("Completion:\n{}\n", response.completion);
    if let Some(ref stop_reason) = response.stop_reason {
        out.push_str(&format!("(stop reason: {})\n", stop_reason));
    }
    out
}

/// Print help message
fn print_help() {
    println!("invoke-text - single-shot legacy Text Completions invocation");
    println!();
    println!("Usage: invoke-text [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Reads the same config.toml as invoke-messages (see invoke-messages --help).");
    println!("The configured prompt is framed with the \\n\\nHuman: / \\n\\nAssistant:");
    println!("turn markers, and max_tokens maps to max_tokens_to_sample.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_completion_keeps_output_verbatim() {
        let response = TextCompletionResponse {
            completion: " I'm doing well, thanks!".to_string(),
            stop_reason: Some("stop_sequence".to_string()),
            stop: None,
        };

        let out = format_completion(&response);
        assert_eq!(
            out,
            "Completion:\n I'm doing well, thanks!\n(stop reason: stop_sequence)\n"
        );
    }

    #[test]
    fn test_format_completion_without_stop_reason() {
        let response = TextCompletionResponse {
            completion: "ok".to_string(),
            stop_reason: None,
            stop: None,
        };

        assert_eq!(format_completion(&response), "Completion:\nok\n");
    }
}
