//! Simple test for an OpenRouter chat completion.
//!
//! Run with: cargo run -p openrouter --example test_chat
//! Or with a custom message: cargo run -p openrouter --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   OPENROUTER_API_KEY - OpenRouter API key for authentication

use openrouter::{
    ChatMessage, CompletionBackend, CompletionParams, OpenRouterClient,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get message from command line args or use default
    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hello! Please respond with a short greeting.".to_string()
    };

    println!("Initializing OpenRouter client...");
    let client = OpenRouterClient::from_env()?;

    println!("Backend: {}", client.name());
    println!("API URL: {}", client.config().api_url);
    println!("Max tokens: {}", client.config().max_tokens);
    println!();

    let messages = vec![
        ChatMessage::system("You are a helpful assistant. Keep answers short."),
        ChatMessage::user(&message_text),
    ];
    let params = CompletionParams {
        model: env::var("OPENROUTER_MODEL")
            .unwrap_or_else(|_| "arcee-ai/trinity-large-preview:free".to_string()),
        temperature: 0.7,
    };

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    let reply = client.complete(messages, &params).await?;

    println!("=== Response ===");
    println!("{}", reply);
    println!("================");

    Ok(())
}
