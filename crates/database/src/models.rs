//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default completion model assigned to new profiles.
pub const DEFAULT_MODEL: &str = "arcee-ai/trinity-large-preview:free";

/// Default sampling temperature assigned to new profiles.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// A registered user with their identity and AI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// Stable external identity (numeric id from the transport).
    pub user_id: i64,
    /// Transport handle, if the user has one.
    pub username: Option<String>,
    /// Display name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Preferred language code (e.g., "en", "ru").
    pub language_code: Option<String>,
    /// Completion model identifier used for this user's replies.
    pub ai_model: String,
    /// Sampling temperature in [0.0, 1.0].
    pub temperature: f64,
    /// When the profile was created.
    pub created_at: String,
    /// Last activity timestamp.
    pub last_seen: String,
}

/// Identity fields the transport knows about a sender.
///
/// Used to create or refresh a profile on first contact; AI settings keep
/// their defaults or previously stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable external identity.
    pub user_id: i64,
    /// Transport handle, if any.
    pub username: Option<String>,
    /// Display name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Preferred language code.
    pub language_code: Option<String>,
}

/// One recorded message in a user's dialogue history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HistoryTurn {
    /// Auto-incrementing id; doubles as the per-user ordering sequence.
    pub id: i64,
    /// Owner of the turn.
    pub user_id: i64,
    /// "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Audit record of a confirmed history deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ClearEvent {
    /// Auto-incrementing id.
    pub id: i64,
    /// User whose history was cleared.
    pub user_id: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Aggregate usage statistics for the admin command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Total registered users.
    pub total_users: i64,
    /// Users seen since the start of the current day.
    pub active_today: i64,
    /// Users who changed their model or temperature away from the defaults.
    pub users_with_settings: i64,
}
