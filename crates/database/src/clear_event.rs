//! Clear-history audit events.

use sqlx::SqlitePool;

use crate::models::ClearEvent;
use crate::Result;

/// Record a confirmed history deletion.
pub async fn insert_event(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO clear_events (user_id)
        VALUES (?)
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get recent clear events for a user, newest first.
pub async fn list_events(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<ClearEvent>> {
    let rows = sqlx::query_as::<_, ClearEvent>(
        r#"
        SELECT id, user_id, created_at
        FROM clear_events
        WHERE user_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_insert_and_list_events() {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        insert_event(db.pool(), 9).await.unwrap();
        insert_event(db.pool(), 9).await.unwrap();
        insert_event(db.pool(), 10).await.unwrap();

        let events = list_events(db.pool(), 9, 10).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].id > events[1].id);
    }
}
