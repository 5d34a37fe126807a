//! Response orchestration for the Parley chat bot.
//!
//! This crate ties the stores and the completion backend together into the
//! per-message pipeline, and gates destructive operations behind an
//! explicit confirmation flow.
//!
//! # Architecture
//!
//! ```text
//! Transport event (message / command / callback)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        HANDLER                              │
//! │                                                             │
//! │  message  → Responder::generate                             │
//! │             profile → history window → prompt → completion  │
//! │             → append user turn, then assistant turn         │
//! │  command  → start / help / profile / stats / settings /     │
//! │             clear_history (opens a confirmation)            │
//! │  callback → ConfirmationRegistry::resolve                   │
//! │             confirmed → bulk history deletion               │
//! └─────────────────────────────────────────────────────────────┘
//!          ↓
//! Reply (text, confirmation prompt, or in-place edit)
//! ```
//!
//! Every failure of the pipeline is a value ([`ResponseError`]); the
//! handler maps each outcome to user-facing text exactly once.
//!
//! # Example
//!
//! ```rust,ignore
//! use database::Database;
//! use openrouter::OpenRouterClient;
//! use responder::{Handler, InboundEvent, Responder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:parley.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let backend = OpenRouterClient::from_env()?;
//!     let handler = Handler::new(Responder::new(backend, db), vec![]);
//!
//!     let reply = handler
//!         .handle(InboundEvent::Message {
//!             sender: Default::default(),
//!             text: "Hello!".to_string(),
//!         })
//!         .await;
//!
//!     println!("{:?}", reply);
//!     Ok(())
//! }
//! ```

mod confirm;
mod error;
mod handler;
mod locks;
pub mod prompt;
mod responder;
mod settings;

// Public exports
pub use confirm::{ConfirmAction, ConfirmChoice, ConfirmationRegistry, Resolution};
pub use error::ResponseError;
pub use handler::{failure_reply, Command, Handler, InboundEvent, Reply, HELP_TEXT};
pub use locks::UserLocks;
pub use responder::{Responder, HISTORY_WINDOW};
pub use settings::{set_model, set_temperature};

// Re-export commonly used types from dependencies
pub use chat_core::{ChatMessage, CompletionBackend, CompletionError, CompletionParams, Role};
pub use database::models::UserIdentity;
