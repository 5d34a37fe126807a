//! User AI settings updates.
//!
//! Raw command arguments are validated here before any store write; a
//! rejected value never reaches the database. Store-level failures are
//! opaque to callers beyond the returned bool.

use database::{user, validation, Database, ValidationError};
use tracing::warn;

/// Set a user's completion model from raw command input.
///
/// Model ids are opaque text; only emptiness and length are checked.
/// Returns whether the store accepted the update.
pub async fn set_model(
    db: &Database,
    user_id: i64,
    raw: &str,
) -> Result<bool, ValidationError> {
    validation::validate_model(raw)?;

    match user::set_ai_model(db.pool(), user_id, raw.trim()).await {
        Ok(updated) => Ok(updated),
        Err(err) => {
            warn!("model update failed for user {}: {}", user_id, err);
            Ok(false)
        }
    }
}

/// Set a user's sampling temperature from raw command input.
///
/// The value must parse as a number in [0.0, 1.0], both ends inclusive.
/// Returns whether the store accepted the update.
pub async fn set_temperature(
    db: &Database,
    user_id: i64,
    raw: &str,
) -> Result<bool, ValidationError> {
    let temperature = validation::parse_temperature(raw)?;

    match user::set_temperature(db.pool(), user_id, temperature).await {
        Ok(updated) => Ok(updated),
        Err(err) => {
            warn!("temperature update failed for user {}: {}", user_id, err);
            Ok(false)
        }
    }
}
