//! Console chat bot example.
//!
//! Drives the full pipeline from a terminal: plain lines are chat messages,
//! lines starting with '/' are commands, and confirmation prompts are
//! answered with `confirm <token>` or `cancel <token>`.
//!
//! Run with: cargo run -p responder --example console_bot
//!
//! Configuration via .env file or environment variables:
//!   OPENROUTER_API_KEY - OpenRouter API key (required)
//!   PARLEY_DB          - Database URL (default: sqlite:parley.db?mode=rwc)
//!   PARLEY_USER_ID     - User id for this console session (default: 1)
//!   PARLEY_FIRST_NAME  - Display name reported on /start
//!   PARLEY_LANGUAGE    - Language code reported on /start
//!   PARLEY_ADMIN_IDS   - Comma-separated allow-list for /stats

use std::env;

use database::Database;
use openrouter::OpenRouterClient;
use responder::{Handler, InboundEvent, Reply, Responder, UserIdentity};
use tokio::io::{AsyncBufReadExt, BufReader};

fn admin_ids_from_env() -> Vec<i64> {
    env::var("PARLEY_ADMIN_IDS")
        .ok()
        .map(|raw| {
            raw.split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn sender_from_env() -> UserIdentity {
    let user_id = env::var("PARLEY_USER_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    UserIdentity {
        user_id,
        username: env::var("USER").ok(),
        first_name: env::var("PARLEY_FIRST_NAME").ok(),
        last_name: None,
        language_code: env::var("PARLEY_LANGUAGE").ok(),
    }
}

/// Map a console line to a transport event.
fn parse_event(sender: &UserIdentity, line: &str) -> InboundEvent {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix('/') {
        let (command, args) = rest.split_once(' ').unwrap_or((rest, ""));
        InboundEvent::Command {
            sender: sender.clone(),
            command: command.to_string(),
            args: args.trim().to_string(),
        }
    } else if let Some(rest) = line.strip_prefix("confirm ") {
        InboundEvent::Callback {
            token: rest.trim().to_string(),
            choice: "confirm".to_string(),
        }
    } else if let Some(rest) = line.strip_prefix("cancel ") {
        InboundEvent::Callback {
            token: rest.trim().to_string(),
            choice: "cancel".to_string(),
        }
    } else {
        InboundEvent::Message {
            sender: sender.clone(),
            text: line.to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let db_url =
        env::var("PARLEY_DB").unwrap_or_else(|_| "sqlite:parley.db?mode=rwc".to_string());
    let db = Database::connect(&db_url).await?;
    db.migrate().await?;

    let backend = OpenRouterClient::from_env()?;
    let handler = Handler::new(Responder::new(backend, db), admin_ids_from_env());
    let sender = sender_from_env();

    println!("Parley console bot. Send /start first; /help lists commands. Ctrl-D quits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match handler.handle(parse_event(&sender, &line)).await {
            Reply::Text(text) => println!("{}", text),
            Reply::ConfirmPrompt { text, token } => {
                println!("{}", text);
                println!("(answer with: confirm {token}  |  cancel {token})");
            }
            Reply::Edit(text) => println!("{}", text),
        }
    }

    Ok(())
}
