//! User profile operations.

use sqlx::SqlitePool;

use crate::models::{UsageStats, UserIdentity, UserProfile, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::Result;

/// Create a profile on first contact, or refresh identity fields on a
/// repeated one. AI settings are never touched here.
pub async fn upsert_user(pool: &SqlitePool, identity: &UserIdentity) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, username, first_name, last_name, language_code)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            username = excluded.username,
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            language_code = excluded.language_code,
            last_seen = datetime('now')
        "#,
    )
    .bind(identity.user_id)
    .bind(&identity.username)
    .bind(&identity.first_name)
    .bind(&identity.last_name)
    .bind(&identity.language_code)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user's profile. Absence is a normal outcome, not an error.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<UserProfile>> {
    let record = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT user_id, username, first_name, last_name, language_code,
               ai_model, temperature, created_at, last_seen
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Bump a user's last-seen timestamp.
pub async fn touch_last_seen(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET last_seen = datetime('now')
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Set a user's completion model.
///
/// Returns false when no profile exists for the id.
pub async fn set_ai_model(pool: &SqlitePool, user_id: i64, model: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET ai_model = ?
        WHERE user_id = ?
        "#,
    )
    .bind(model)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Set a user's sampling temperature.
///
/// Range checking happens in [`crate::validation`] before this is called.
/// Returns false when no profile exists for the id.
pub async fn set_temperature(pool: &SqlitePool, user_id: i64, temperature: f64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET temperature = ?
        WHERE user_id = ?
        "#,
    )
    .bind(temperature)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Aggregate usage statistics for the admin command.
pub async fn get_stats(pool: &SqlitePool) -> Result<UsageStats> {
    let total_users = count_users(pool).await?;

    let active_today = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        WHERE last_seen >= datetime('now', 'start of day')
        "#,
    )
    .fetch_one(pool)
    .await?;

    let users_with_settings = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        WHERE ai_model <> ? OR temperature <> ?
        "#,
    )
    .bind(DEFAULT_MODEL)
    .bind(DEFAULT_TEMPERATURE)
    .fetch_one(pool)
    .await?;

    Ok(UsageStats {
        total_users,
        active_today,
        users_with_settings,
    })
}
