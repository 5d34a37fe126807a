//! Prompt assembly.
//!
//! Builds the ordered message list sent to the completion backend: one
//! system message derived from the profile, the stored history window, and
//! exactly one user message for the current turn.

use chat_core::{ChatMessage, Role};
use database::models::{HistoryTurn, UserProfile};
use tracing::warn;

/// Display name used when the profile has none.
pub const DEFAULT_DISPLAY_NAME: &str = "friend";

/// Language used when the profile has none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Build the system instruction for a profile.
fn system_prompt(profile: &UserProfile) -> String {
    let name = profile
        .first_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DISPLAY_NAME);

    let language = profile
        .language_code
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE);

    format!(
        "You are a personal chat assistant.\n\
         User name: {name}.\n\
         Language: {language}.\n\
         \n\
         Answer in the user's language and take the previous messages into \
         account. Keep answers short and to the point. If a list would be \
         long, cut it down to 4 items and finish the last sentence completely."
    )
}

/// Assemble the ordered message list for one generation.
///
/// Pure function: the same profile, window, and message always produce the
/// same output. The window must not contain the current message; it is the
/// caller's job to fetch history before recording the new turn.
pub fn assemble(
    profile: &UserProfile,
    window: &[HistoryTurn],
    user_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(window.len() + 2);

    messages.push(ChatMessage::system(system_prompt(profile)));

    for turn in window {
        match Role::parse(&turn.role) {
            Some(role) => messages.push(ChatMessage {
                role,
                content: turn.content.clone(),
            }),
            None => {
                // Never guess a role; a bad row is dropped from the prompt.
                warn!(
                    "skipping history turn {} with unknown role {:?}",
                    turn.id, turn.role
                );
            }
        }
    }

    messages.push(ChatMessage::user(user_message));

    messages
}
