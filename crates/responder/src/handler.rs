//! Transport-facing event handling.
//!
//! The transport adapter (Telegram, console, tests) delivers
//! [`InboundEvent`]s and renders the returned [`Reply`] values. Mapping a
//! pipeline outcome to user-facing text happens here exactly once; raw
//! failure causes stay in the log.

use chat_core::CompletionBackend;
use database::models::UserIdentity;
use database::user;
use tracing::{debug, warn};

use crate::confirm::{ConfirmAction, ConfirmChoice, ConfirmationRegistry, Resolution};
use crate::error::ResponseError;
use crate::prompt::DEFAULT_DISPLAY_NAME;
use crate::responder::Responder;
use crate::settings;

/// Help text shown for the help command.
pub const HELP_TEXT: &str = "Here is what I can do:\n\
/start - Introduce yourself and register\n\
/help - Show this message\n\
/profile - Show your profile\n\
/set_model <model> - Change the completion model\n\
/set_temp <0.0-1.0> - Adjust answer creativity\n\
/clear_history - Forget the whole conversation\n\
\n\
Anything else you send is answered by the model, with your recent \
conversation as context.";

const NOT_REGISTERED: &str =
    "Looks like we have not met yet. Send /start so I can set things up.";

const STALE_CONFIRMATION: &str = "This confirmation has already been handled.";

/// An event delivered by the transport adapter.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// An ordinary text message.
    Message { sender: UserIdentity, text: String },
    /// A parsed command with its argument tail.
    Command {
        sender: UserIdentity,
        command: String,
        args: String,
    },
    /// A confirmation callback correlated by token.
    Callback { token: String, choice: String },
}

/// What the transport should do with the outcome of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send a new message with this text.
    Text(String),
    /// Ask the user to confirm; the transport renders two choices
    /// (`confirm` / `cancel`) correlated by `token`.
    ConfirmPrompt { text: String, token: String },
    /// Edit the confirmation prompt in place with this acknowledgment.
    Edit(String),
}

/// Commands understood by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Profile,
    Stats,
    SetModel,
    SetTemp,
    ClearHistory,
}

impl Command {
    /// Parse a command name as delivered by the transport. A leading slash
    /// is tolerated.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('/') {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "profile" => Some(Command::Profile),
            "stats" => Some(Command::Stats),
            "set_model" => Some(Command::SetModel),
            "set_temp" => Some(Command::SetTemp),
            "clear_history" => Some(Command::ClearHistory),
            _ => None,
        }
    }
}

/// Handles transport events against the response pipeline.
pub struct Handler<B: CompletionBackend> {
    responder: Responder<B>,
    confirmations: ConfirmationRegistry,
    admin_ids: Vec<i64>,
}

impl<B: CompletionBackend> Handler<B> {
    /// Create a handler. `admin_ids` is the allow-list for the stats
    /// command.
    pub fn new(responder: Responder<B>, admin_ids: Vec<i64>) -> Self {
        Self {
            responder,
            confirmations: ConfirmationRegistry::new(),
            admin_ids,
        }
    }

    /// Get the underlying responder.
    pub fn responder(&self) -> &Responder<B> {
        &self.responder
    }

    /// Process one transport event to completion.
    pub async fn handle(&self, event: InboundEvent) -> Reply {
        match event {
            InboundEvent::Message { sender, text } => self.handle_message(&sender, &text).await,
            InboundEvent::Command {
                sender,
                command,
                args,
            } => self.handle_command(&sender, &command, &args).await,
            InboundEvent::Callback { token, choice } => {
                self.handle_callback(&token, &choice).await
            }
        }
    }

    async fn handle_message(&self, sender: &UserIdentity, text: &str) -> Reply {
        self.touch(sender.user_id).await;

        match self.responder.generate(sender.user_id, text).await {
            Ok(reply) => Reply::Text(reply),
            Err(err) => Reply::Text(failure_reply(&err).to_string()),
        }
    }

    async fn handle_command(&self, sender: &UserIdentity, command: &str, args: &str) -> Reply {
        let Some(command) = Command::parse(command) else {
            debug!("unknown command {:?} from user {}", command, sender.user_id);
            return Reply::Text("I don't know that command. Send /help for the list.".to_string());
        };

        if command != Command::Start {
            self.touch(sender.user_id).await;
        }

        match command {
            Command::Start => self.cmd_start(sender).await,
            Command::Help => Reply::Text(HELP_TEXT.to_string()),
            Command::Profile => self.cmd_profile(sender.user_id).await,
            Command::Stats => self.cmd_stats(sender.user_id).await,
            Command::SetModel => self.cmd_set_model(sender.user_id, args).await,
            Command::SetTemp => self.cmd_set_temp(sender.user_id, args).await,
            Command::ClearHistory => self.cmd_clear_history(sender.user_id).await,
        }
    }

    async fn handle_callback(&self, token: &str, choice: &str) -> Reply {
        let Some(choice) = ConfirmChoice::parse(choice) else {
            debug!("unparseable confirmation choice {:?}", choice);
            return Reply::Edit(STALE_CONFIRMATION.to_string());
        };

        match self.confirmations.resolve(token, choice).await {
            Resolution::Confirmed {
                action: ConfirmAction::ClearHistory,
                user_id,
            } => {
                if self.responder.clear_history(user_id).await {
                    Reply::Edit(
                        "Dialogue history cleared. We start from a clean slate!".to_string(),
                    )
                } else {
                    Reply::Edit("Could not clear the history.".to_string())
                }
            }
            Resolution::Cancelled { .. } => {
                Reply::Edit("Clearing cancelled. Your history is safe.".to_string())
            }
            Resolution::AlreadyResolved | Resolution::Unknown => {
                Reply::Edit(STALE_CONFIRMATION.to_string())
            }
        }
    }

    async fn cmd_start(&self, sender: &UserIdentity) -> Reply {
        let pool = self.responder.database().pool();

        if let Err(err) = user::upsert_user(pool, sender).await {
            warn!("profile upsert failed for user {}: {}", sender.user_id, err);
            return Reply::Text(
                "Something went wrong while saving your profile. Please try again.".to_string(),
            );
        }

        let name = sender
            .first_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME);

        Reply::Text(format!(
            "Nice to meet you, {}! I will remember you from now on. \
             Just send me a message and we can talk.",
            name
        ))
    }

    async fn cmd_profile(&self, user_id: i64) -> Reply {
        let pool = self.responder.database().pool();

        let profile = match user::get_user(pool, user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return Reply::Text(NOT_REGISTERED.to_string()),
            Err(err) => {
                warn!("profile lookup failed for user {}: {}", user_id, err);
                return Reply::Text(NOT_REGISTERED.to_string());
            }
        };

        let text = format!(
            "Your profile:\n\
             ID: {}\n\
             Username: {}\n\
             Name: {}\n\
             Last name: {}\n\
             Language: {}\n\
             \n\
             Registered: {}\n\
             Last seen: {}\n\
             \n\
             AI settings:\n\
             Model: {}\n\
             Creativity: {}",
            profile.user_id,
            profile.username.as_deref().unwrap_or("not set"),
            profile.first_name.as_deref().unwrap_or("not set"),
            profile.last_name.as_deref().unwrap_or("not set"),
            profile.language_code.as_deref().unwrap_or("unknown"),
            profile.created_at,
            profile.last_seen,
            profile.ai_model,
            profile.temperature,
        );

        Reply::Text(text)
    }

    async fn cmd_stats(&self, user_id: i64) -> Reply {
        if !self.admin_ids.contains(&user_id) {
            return Reply::Text("This command is for the maintainers only.".to_string());
        }

        let pool = self.responder.database().pool();
        match user::get_stats(pool).await {
            Ok(stats) => Reply::Text(format!(
                "Bot statistics:\n\
                 Total users: {}\n\
                 Active today: {}\n\
                 Customized settings: {}",
                stats.total_users, stats.active_today, stats.users_with_settings
            )),
            Err(err) => {
                warn!("stats query failed: {}", err);
                Reply::Text("Could not load statistics.".to_string())
            }
        }
    }

    async fn cmd_set_model(&self, user_id: i64, args: &str) -> Reply {
        if !self.is_registered(user_id).await {
            return Reply::Text(NOT_REGISTERED.to_string());
        }

        let args = args.trim();
        if args.is_empty() {
            return Reply::Text(
                "Usage: /set_model <model id>\n\
                 Example: /set_model deepseek/deepseek-r1-0528:free\n\
                 Or: /set_model arcee-ai/trinity-mini:free"
                    .to_string(),
            );
        }

        match settings::set_model(self.responder.database(), user_id, args).await {
            Ok(true) => Reply::Text(format!("Model changed to: {}", args)),
            Ok(false) => Reply::Text("Could not change the model.".to_string()),
            Err(err) => Reply::Text(format!("That model id was rejected: {}.", err)),
        }
    }

    async fn cmd_set_temp(&self, user_id: i64, args: &str) -> Reply {
        if !self.is_registered(user_id).await {
            return Reply::Text(NOT_REGISTERED.to_string());
        }

        let args = args.trim();
        if args.is_empty() {
            return Reply::Text(
                "Usage: /set_temp <number from 0.0 to 1.0>\n\
                 0.0 keeps answers strict, 1.0 makes them more creative."
                    .to_string(),
            );
        }

        match settings::set_temperature(self.responder.database(), user_id, args).await {
            Ok(true) => Reply::Text(format!("Creativity set to: {}", args.trim())),
            Ok(false) => Reply::Text("Could not change the setting.".to_string()),
            Err(err) => Reply::Text(format!(
                "{}. Enter a number from 0.0 to 1.0.",
                err
            )),
        }
    }

    async fn cmd_clear_history(&self, user_id: i64) -> Reply {
        if !self.is_registered(user_id).await {
            return Reply::Text(NOT_REGISTERED.to_string());
        }

        let token = self
            .confirmations
            .begin(ConfirmAction::ClearHistory, user_id)
            .await;

        Reply::ConfirmPrompt {
            text: "Are you sure you want to clear the whole dialogue history?\n\
                   This cannot be undone. All recorded messages will be deleted."
                .to_string(),
            token,
        }
    }

    async fn is_registered(&self, user_id: i64) -> bool {
        let pool = self.responder.database().pool();
        match user::get_user(pool, user_id).await {
            Ok(profile) => profile.is_some(),
            Err(err) => {
                warn!("profile lookup failed for user {}: {}", user_id, err);
                false
            }
        }
    }

    async fn touch(&self, user_id: i64) {
        let pool = self.responder.database().pool();
        if let Err(err) = user::touch_last_seen(pool, user_id).await {
            warn!("failed to bump last_seen for user {}: {}", user_id, err);
        }
    }
}

/// Map a generation failure to its user-facing reply.
///
/// The single place where pipeline outcomes become text; raw causes are
/// already logged where they occurred.
pub fn failure_reply(err: &ResponseError) -> &'static str {
    match err {
        ResponseError::MissingCredential => {
            "The assistant is not configured yet. Please try again later."
        }
        ResponseError::UnknownUser(_) => NOT_REGISTERED,
        ResponseError::Transient(_) => {
            "I'm having trouble reaching the language model. Please try again later."
        }
        ResponseError::Malformed(_) => {
            "The language model answered in an unexpected format. Try asking in a different way."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("start"), Some(Command::Start));
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse(" /clear_history "), Some(Command::ClearHistory));
        assert_eq!(Command::parse("set_model"), Some(Command::SetModel));
        assert_eq!(Command::parse("frobnicate"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_failure_reply_is_generic() {
        let transient = ResponseError::Transient("connection refused to 10.0.0.1".to_string());
        assert!(!failure_reply(&transient).contains("10.0.0.1"));

        let malformed = ResponseError::Malformed("missing field `choices`".to_string());
        assert!(!failure_reply(&malformed).contains("choices"));
    }

    #[test]
    fn test_failure_reply_distinguishes_outcomes() {
        let texts = [
            failure_reply(&ResponseError::MissingCredential),
            failure_reply(&ResponseError::UnknownUser(1)),
            failure_reply(&ResponseError::Transient(String::new())),
            failure_reply(&ResponseError::Malformed(String::new())),
        ];
        for (i, a) in texts.iter().enumerate() {
            for b in texts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_help_text_lists_commands() {
        for command in [
            "/start",
            "/help",
            "/profile",
            "/set_model",
            "/set_temp",
            "/clear_history",
        ] {
            assert!(HELP_TEXT.contains(command), "missing {}", command);
        }
    }
}
