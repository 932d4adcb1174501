//! SQLite persistence layer for campaign message logs.
//!
//! This crate stores the delivery history: one entry per dispatch attempt,
//! queried per owner with channel/status filters and pagination.
//!
//! # Example
//!
//! ```no_run
//! use database::{message_log, Database, LogFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:campaign.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Most recent sends for a user
//!     let entries = message_log::list(db.pool(), &LogFilter::for_owner("user_123")).await?;
//!     println!("{} entries", entries.len());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod message_log;
pub mod models;

pub use error::{DatabaseError, Result};
pub use models::{ChannelStats, LogFilter, MessageLogRow};

use async_trait::async_trait;
use campaign_core::{LogStoreError, MessageLogStore, NewMessageLog};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

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
    /// let db = database::Database::connect("sqlite:data/campaign.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(url, pool_size, "Connected to database");

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

#[async_trait]
impl MessageLogStore for Database {
    async fn append(&self, entry: NewMessageLog) -> std::result::Result<i64, LogStoreError> {
        message_log::insert(&self.pool, &entry).await.map_err(|e| {
            tracing::error!(error = %e, owner = %entry.owner_id, "Failed to write message log");
            LogStoreError(e.to_string())
        })
    }
}
