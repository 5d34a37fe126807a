//! Dialogue history persistence.

use sqlx::SqlitePool;

use crate::models::HistoryTurn;
use crate::Result;

/// Append one turn to a user's history.
pub async fn append_turn(
    pool: &SqlitePool,
    user_id: i64,
    role: &str,
    content: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO history_turns (user_id, role, content)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(role)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the most recent turns for a user, oldest first, at most `limit`.
pub async fn recent_turns(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<HistoryTurn>> {
    let mut rows = sqlx::query_as::<_, HistoryTurn>(
        r#"
        SELECT id, user_id, role, content, created_at
        FROM history_turns
        WHERE user_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.reverse();
    Ok(rows)
}

/// Delete all turns for a user. Returns the number of deleted rows.
pub async fn clear_history(pool: &SqlitePool, user_id: i64) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM history_turns
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count turns stored for a user.
pub async fn count_turns(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM history_turns
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserIdentity;
    use crate::{user, Database};

    async fn test_db_with_user(user_id: i64) -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        user::upsert_user(
            db.pool(),
            &UserIdentity {
                user_id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_append_and_recent_order() {
        let db = test_db_with_user(1).await;

        append_turn(db.pool(), 1, "user", "Hello").await.unwrap();
        append_turn(db.pool(), 1, "assistant", "Hi there!")
            .await
            .unwrap();

        let turns = recent_turns(db.pool(), 1, 8).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[0].content, "Hello");
        assert_eq!(turns[1].role, "assistant");
        assert_eq!(turns[1].content, "Hi there!");
        assert!(turns[0].id < turns[1].id);
    }

    #[tokio::test]
    async fn test_recent_window_keeps_latest() {
        let db = test_db_with_user(1).await;

        for i in 0..6 {
            append_turn(db.pool(), 1, "user", &format!("q{}", i))
                .await
                .unwrap();
            append_turn(db.pool(), 1, "assistant", &format!("a{}", i))
                .await
                .unwrap();
        }

        let turns = recent_turns(db.pool(), 1, 4).await.unwrap();
        assert_eq!(turns.len(), 4);
        // Oldest-first slice of the most recent four messages.
        assert_eq!(turns[0].content, "q4");
        assert_eq!(turns[1].content, "a4");
        assert_eq!(turns[2].content, "q5");
        assert_eq!(turns[3].content, "a5");
    }

    #[tokio::test]
    async fn test_clear_history_is_per_user() {
        let db = test_db_with_user(1).await;
        user::upsert_user(
            db.pool(),
            &UserIdentity {
                user_id: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        append_turn(db.pool(), 1, "user", "mine").await.unwrap();
        append_turn(db.pool(), 2, "user", "theirs").await.unwrap();

        let deleted = clear_history(db.pool(), 1).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(recent_turns(db.pool(), 1, 8).await.unwrap().is_empty());
        assert_eq!(count_turns(db.pool(), 2).await.unwrap(), 1);
    }
}
