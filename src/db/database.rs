//! SQLite connection pool and schema migrations.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use deadpool_sqlite::{Config as PoolConfig, Pool, Runtime};
use rusqlite_migration::{M, Migrations};

static MIGRATIONS: LazyLock<Migrations<'static>> = LazyLock::new(|| {
    Migrations::new(vec![
        M::up(
            "CREATE TABLE leads (
                id TEXT PRIMARY KEY,
                body_location TEXT,
                size TEXT,
                styles TEXT NOT NULL DEFAULT '[]',
                description TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'novo',
                created_at TEXT NOT NULL
            )",
        ),
        M::up(
            "CREATE TABLE portfolio (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                image_url TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        ),
        M::up(
            "CREATE TABLE pricing_tiers (
                id TEXT PRIMARY KEY,
                icon TEXT NOT NULL DEFAULT '✨',
                title TEXT NOT NULL,
                subtitle TEXT NOT NULL DEFAULT '',
                price TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        ),
        M::up(
            "CREATE TABLE promotions (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                original_price TEXT NOT NULL DEFAULT '',
                promo_price TEXT NOT NULL,
                image_url TEXT NOT NULL DEFAULT '',
                active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )",
        ),
        M::up(
            "CREATE TABLE site_settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                profile_image_url TEXT NOT NULL DEFAULT '',
                instagram_handle TEXT NOT NULL DEFAULT '',
                phone_number TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT ''
            )",
        ),
    ])
});

/// Cheap-to-clone handle over the connection pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

/// Row counts per table, for `inkbook db stats`.
#[derive(Debug, Clone, Default)]
pub struct DbStats {
    pub leads: i64,
    pub portfolio: i64,
    pub pricing_tiers: i64,
    pub promotions: i64,
}

impl Database {
    /// Open (creating if needed) the database at `path` and run migrations.
    pub async fn connect(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let pool = PoolConfig::new(path)
            .create_pool(Runtime::Tokio1)
            .context("failed to create sqlite pool")?;

        let db = Self { pool };
        db.migrate().await?;
        tracing::debug!("Database ready at {path}");
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| anyhow!("failed to get connection: {e}"))?;
        conn.interact(|conn| MIGRATIONS.to_latest(conn))
            .await
            .map_err(|e| anyhow!("database task failed: {e}"))?
            .context("migrations failed")?;
        Ok(())
    }

    /// Run a closure against a pooled connection on the blocking thread.
    pub(crate) async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| anyhow!("failed to get connection: {e}"))?;
        conn.interact(f)
            .await
            .map_err(|e| anyhow!("database task failed: {e}"))?
            .context("query failed")
    }

    /// Row counts for the stats command.
    pub async fn stats(&self) -> Result<DbStats> {
        self.call(|conn| {
            let count = |conn: &rusqlite::Connection, table: &str| -> rusqlite::Result<i64> {
                conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
            };
            Ok(DbStats {
                leads: count(conn, "leads")?,
                portfolio: count(conn, "portfolio")?,
                pricing_tiers: count(conn, "pricing_tiers")?,
                promotions: count(conn, "promotions")?,
            })
        })
        .await
    }

    /// Drop all captured leads. Used by `inkbook db clear`.
    pub async fn clear_leads(&self) -> Result<usize> {
        self.call(|conn| conn.execute("DELETE FROM leads", []))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_runs_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap()).await.unwrap();

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.leads, 0);
        assert_eq!(stats.pricing_tiers, 0);
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let path_str = path.to_str().unwrap();

        let _first = Database::connect(path_str).await.unwrap();
        // Reopening an already-migrated database must not fail
        let second = Database::connect(path_str).await.unwrap();
        assert_eq!(second.stats().await.unwrap().leads, 0);
    }
}
