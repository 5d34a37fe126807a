//! Confirmation flow for destructive actions.
//!
//! A destructive command opens a pending confirmation keyed by an opaque
//! token; the transport surfaces the token as two mutually exclusive
//! choices. Resolution happens at most once: terminal states are final and
//! repeated choices acknowledge without mutating anything.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Destructive actions gated behind confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Bulk deletion of a user's dialogue history.
    ClearHistory,
}

/// The user's answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    /// Proceed with the action.
    Confirm,
    /// Keep everything as is.
    Cancel,
}

impl ConfirmChoice {
    /// Wire representation used in transport callbacks.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmChoice::Confirm => "confirm",
            ConfirmChoice::Cancel => "cancel",
        }
    }

    /// Parse a transport callback choice.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirm" => Some(ConfirmChoice::Confirm),
            "cancel" => Some(ConfirmChoice::Cancel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmState {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug)]
struct ConfirmationRequest {
    action: ConfirmAction,
    user_id: i64,
    state: ConfirmState,
}

/// Outcome of resolving a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The request was pending and the user confirmed; the caller must now
    /// perform the action.
    Confirmed { action: ConfirmAction, user_id: i64 },
    /// The request was pending and the user declined.
    Cancelled { user_id: i64 },
    /// The request already reached a terminal state. Acknowledge, do nothing.
    AlreadyResolved,
    /// No request is known for the token. Acknowledge, do nothing.
    Unknown,
}

/// In-memory registry of confirmation requests keyed by correlation token.
#[derive(Debug, Default)]
pub struct ConfirmationRegistry {
    requests: RwLock<HashMap<String, ConfirmationRequest>>,
}

impl ConfirmationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a pending confirmation and return its correlation token.
    pub async fn begin(&self, action: ConfirmAction, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();

        let mut requests = self.requests.write().await;
        requests.insert(
            token.clone(),
            ConfirmationRequest {
                action,
                user_id,
                state: ConfirmState::Pending,
            },
        );

        token
    }

    /// Resolve a token with the user's choice.
    ///
    /// Only a `Pending` request transitions; anything else is reported as
    /// already handled so the caller can still acknowledge the transport.
    pub async fn resolve(&self, token: &str, choice: ConfirmChoice) -> Resolution {
        let mut requests = self.requests.write().await;

        match requests.get_mut(token) {
            None => Resolution::Unknown,
            Some(request) if request.state != ConfirmState::Pending => {
                Resolution::AlreadyResolved
            }
            Some(request) => match choice {
                ConfirmChoice::Confirm => {
                    request.state = ConfirmState::Confirmed;
                    Resolution::Confirmed {
                        action: request.action,
                        user_id: request.user_id,
                    }
                }
                ConfirmChoice::Cancel => {
                    request.state = ConfirmState::Cancelled;
                    Resolution::Cancelled {
                        user_id: request.user_id,
                    }
                }
            },
        }
    }
}
