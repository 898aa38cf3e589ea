use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::Config;
use crate::domain::errors::DomainResult;
use crate::infrastructure::unit_of_work::UnitOfWork;

/// Handle to the relational store
///
/// Cheap to clone; every clone shares one connection pool. Constructed once
/// at startup (or once per test) and handed to the router as state.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the database named by the configuration and applies the schema
    pub async fn connect(config: &Config) -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Opens a private in-memory database with the schema applied
    ///
    /// The pool holds exactly one connection for its whole life, since
    /// every SQLite in-memory connection is a separate database.
    pub async fn in_memory() -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Creates the tables if they are missing
    ///
    /// Column names match the existing `iot.db` layout so an old database
    /// file opens unchanged.
    pub async fn init_schema(&self) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nom TEXT NOT NULL,
                mac_address TEXT NOT NULL UNIQUE,
                location TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS measures (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL,
                date TEXT NOT NULL,
                device_id INTEGER NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
                mesure_value REAL NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS ix_measures_device_id ON measures (device_id)")
            .execute(&self.pool)
            .await?;

        info!("database schema ready");
        Ok(())
    }

    /// Starts a unit of work backed by a fresh transaction
    pub async fn begin(&self) -> DomainResult<UnitOfWork> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork::new(tx))
    }

    /// Closes every connection in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
