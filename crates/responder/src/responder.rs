//! The response generation pipeline.

use chat_core::{CompletionBackend, CompletionParams, Role};
use database::{clear_event, history, user, Database};
use tracing::{debug, info, warn};

use crate::error::ResponseError;
use crate::locks::UserLocks;
use crate::prompt;

/// Default number of history turns included in the prompt window.
pub const HISTORY_WINDOW: usize = 8;

/// Generates contextual replies for incoming user messages.
///
/// The responder coordinates the profile store, the history store, the
/// prompt assembler, and the completion backend. One invocation performs
/// at most one remote request and, on success, appends exactly one user
/// turn followed by one assistant turn.
pub struct Responder<B: CompletionBackend> {
    backend: B,
    db: Database,
    history_window: usize,
    locks: UserLocks,
}

impl<B: CompletionBackend> Responder<B> {
    /// Create a responder with the default history window.
    pub fn new(backend: B, db: Database) -> Self {
        Self {
            backend,
            db,
            history_window: HISTORY_WINDOW,
            locks: UserLocks::new(),
        }
    }

    /// Override the history window size.
    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    /// Get the database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Get the completion backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate a reply to one user message.
    ///
    /// On success the exchange is recorded in history, user turn first.
    /// Persistence is best-effort relative to response delivery: a failed
    /// append is logged, the computed reply is still returned. On any
    /// failure nothing is appended.
    pub async fn generate(&self, user_id: i64, text: &str) -> Result<String, ResponseError> {
        if !self.backend.has_credential() {
            warn!("completion credential missing; refusing to generate");
            return Err(ResponseError::MissingCredential);
        }

        let profile = match user::get_user(self.db.pool(), user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!("no profile for user {}", user_id);
                return Err(ResponseError::UnknownUser(user_id));
            }
            Err(err) => {
                warn!("profile lookup failed for user {}: {}", user_id, err);
                return Err(ResponseError::UnknownUser(user_id));
            }
        };

        // Serialize read-window -> complete -> append per user so concurrent
        // requests cannot split a turn pair or double-read the same window.
        let _section = self.locks.acquire(user_id).await;

        // The window is fetched before the new turn is recorded, so the
        // current message can never leak into its own prompt context.
        let window = match history::recent_turns(
            self.db.pool(),
            user_id,
            self.history_window as i64,
        )
        .await
        {
            Ok(turns) => turns,
            Err(err) => {
                warn!(
                    "history read failed for user {}: {}; continuing without context",
                    user_id, err
                );
                Vec::new()
            }
        };

        let messages = prompt::assemble(&profile, &window, text);
        let params = CompletionParams {
            model: profile.ai_model.clone(),
            temperature: profile.temperature,
        };

        debug!(
            "requesting completion for user {} (model: {}, context: {} turns)",
            user_id,
            params.model,
            window.len()
        );

        let reply = self
            .backend
            .complete(messages, &params)
            .await
            .map_err(|err| {
                warn!("completion failed for user {}: {}", user_id, err);
                ResponseError::from(err)
            })?;

        // Record the exchange, question before answer. If the user turn
        // cannot be written the assistant turn is withheld too, so history
        // never contains an answer without its question.
        match history::append_turn(self.db.pool(), user_id, Role::User.as_str(), text).await {
            Ok(()) => {
                if let Err(err) =
                    history::append_turn(self.db.pool(), user_id, Role::Assistant.as_str(), &reply)
                        .await
                {
                    warn!("failed to record assistant turn for user {}: {}", user_id, err);
                }
            }
            Err(err) => {
                warn!("failed to record user turn for user {}: {}", user_id, err);
            }
        }

        Ok(reply)
    }

    /// Delete a user's entire history. Returns whether the store accepted
    /// the deletion.
    ///
    /// Invoked from the confirmation flow's affirmative branch only.
    pub async fn clear_history(&self, user_id: i64) -> bool {
        let _section = self.locks.acquire(user_id).await;

        match history::clear_history(self.db.pool(), user_id).await {
            Ok(deleted) => {
                info!("cleared {} history turns for user {}", deleted, user_id);
                if let Err(err) = clear_event::insert_event(self.db.pool(), user_id).await {
                    warn!("failed to record clear event for user {}: {}", user_id, err);
                }
                true
            }
            Err(err) => {
                warn!("failed to clear history for user {}: {}", user_id, err);
                false
            }
        }
    }
}
