//! SQLite persistence layer for Parley.
//!
//! This crate provides async database operations for user profiles and
//! dialogue history using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{models::UserIdentity, user, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:parley.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Register a user
//!     let identity = UserIdentity {
//!         user_id: 42,
//!         first_name: Some("Ana".to_string()),
//!         language_code: Some("en".to_string()),
//!         ..Default::default()
//!     };
//!     user::upsert_user(db.pool(), &identity).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod clear_event;
pub mod error;
pub mod history;
pub mod models;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    ClearEvent, HistoryTurn, UsageStats, UserIdentity, UserProfile, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/parley.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    /// Default pool size for database connections.
    /// Enough headroom for concurrent per-user message processing.
    const DEFAULT_POOL_SIZE: u32 = 20;

    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserIdentity;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_full_exchange_round_trip() {
        let db = test_db().await;

        let identity = UserIdentity {
            user_id: 42,
            first_name: Some("Ana".to_string()),
            language_code: Some("en".to_string()),
            ..Default::default()
        };
        user::upsert_user(db.pool(), &identity).await.unwrap();

        history::append_turn(db.pool(), 42, "user", "List 6 colors")
            .await
            .unwrap();
        history::append_turn(db.pool(), 42, "assistant", "red, green, blue, yellow")
            .await
            .unwrap();

        let turns = history::recent_turns(db.pool(), 42, 8).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[1].role, "assistant");

        let deleted = history::clear_history(db.pool(), 42).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(history::recent_turns(db.pool(), 42, 8)
            .await
            .unwrap()
            .is_empty());
    }
}
