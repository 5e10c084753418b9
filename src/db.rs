//! # Database Module
//!
//! Owns the SQLite connection (WAL mode) and the table definitions for
//! vehicles and administrators. Services hold an `Arc<Store>` and run their
//! statements through [`Store::call`]; each statement is executed on its own,
//! with consistency left to SQLite.

use crate::error::{ApiError, ApiResult};
use rusqlite::functions::FunctionFlags;
use std::path::Path;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

/// Number of records returned per page by the listing operations.
pub const PAGE_SIZE: i64 = 10;

/// The persistence context: one async SQLite connection plus schema setup.
pub struct Store {
    conn: Connection,
    path: String,
}

impl Store {
    /// Opens (or creates) the database file at `path` and applies the schema.
    pub async fn new<P: AsRef<Path>>(path: P) -> ApiResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        info!("Opening database at: {}", path_str);

        let conn = Connection::open(&path_str)
            .await
            .map_err(|e| ApiError::Database(format!("Failed to open database: {}", e)))?;

        let store = Self {
            conn,
            path: path_str,
        };
        store.initialize().await?;
        Ok(store)
    }

    /// Creates an in-memory database (useful for testing)
    pub async fn in_memory() -> ApiResult<Self> {
        info!("Opening in-memory database");

        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| ApiError::Database(format!("Failed to create database: {}", e)))?;

        let store = Self {
            conn,
            path: ":memory:".to_string(),
        };
        store.initialize().await?;
        Ok(store)
    }

    async fn initialize(&self) -> ApiResult<()> {
        self.initialize_pragmas().await?;
        self.register_functions().await?;
        self.migrate().await?;
        info!("Database ready");
        Ok(())
    }

    /// - PRAGMA journal_mode=WAL; (readers do not block the writer)
    /// - PRAGMA synchronous=NORMAL;
    async fn initialize_pragmas(&self) -> ApiResult<()> {
        debug!("Setting up database pragmas...");

        self.conn
            .call(|conn| {
                conn.execute_batch(
                    "PRAGMA journal_mode=WAL;
                     PRAGMA synchronous=NORMAL;
                     PRAGMA foreign_keys=ON;",
                )?;
                Ok(())
            })
            .await
            .map_err(|e| ApiError::Database(format!("Failed to set pragmas: {}", e)))
    }

    /// Registers `unicode_lower(text)`. SQLite's own `lower()` only folds ASCII,
    /// so `ÉPICA` would never match `épica`. NULL passes through.
    async fn register_functions(&self) -> ApiResult<()> {
        self.conn
            .call(|conn| {
                conn.create_scalar_function(
                    "unicode_lower",
                    1,
                    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
                    |ctx| {
                        let text = ctx.get::<Option<String>>(0)?;
                        Ok(text.map(|t| t.to_lowercase()))
                    },
                )?;
                Ok(())
            })
            .await
            .map_err(|e| ApiError::Database(format!("Failed to register functions: {}", e)))
    }

    /// Creates the application tables if they do not exist yet.
    async fn migrate(&self) -> ApiResult<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(
                    r#"
                    CREATE TABLE IF NOT EXISTS vehicles (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        name TEXT NOT NULL,
                        brand TEXT NOT NULL,
                        year INTEGER NOT NULL
                    );
                    CREATE TABLE IF NOT EXISTS administrators (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        email TEXT UNIQUE NOT NULL,
                        password_hash TEXT NOT NULL,
                        role TEXT NOT NULL
                    );
                    CREATE INDEX IF NOT EXISTS idx_administrators_email ON administrators(email);
                    "#,
                )?;
                Ok(())
            })
            .await
            .map_err(|e| ApiError::Database(format!("Migration failed: {}", e)))?;

        debug!("Tables initialized");
        Ok(())
    }

    /// Runs `f` against the underlying connection on the database thread.
    pub async fn call<F, T>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.conn
            .call(move |conn| f(conn).map_err(tokio_rusqlite::Error::from))
            .await
            .map_err(ApiError::from)
    }

    /// Cheap liveness probe used by the health endpoint.
    pub async fn ping(&self) -> ApiResult<()> {
        self.call(|conn| conn.query_row("SELECT 1", [], |_| Ok(())))
            .await
    }

    /// Get the database file path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check if database is in-memory
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

/// A `LIMIT`/`OFFSET` window for 1-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Absent or zero pages resolve to the first page.
    pub fn new(page: Option<u32>) -> Self {
        let page = i64::from(page.unwrap_or(1).max(1));
        Self {
            limit: PAGE_SIZE,
            offset: (page - 1) * PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(store: &Store) -> Vec<String> {
        store
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_db() {
        let store = Store::in_memory().await.unwrap();
        assert!(store.is_in_memory());
        assert_eq!(store.path(), ":memory:");
        assert_eq!(table_names(&store).await, ["administrators", "vehicles"]);
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        assert_eq!(table_names(&store).await.len(), 2);
    }

    #[tokio::test]
    async fn test_sql_errors_become_database_errors() {
        let store = Store::in_memory().await.unwrap();
        let result = store
            .call(|conn| conn.execute("INSERT INTO missing_table VALUES (1)", []))
            .await;
        assert!(matches!(result, Err(ApiError::Database(_))));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veiculos.db");

        {
            let store = Store::new(&path).await.unwrap();
            assert!(!store.is_in_memory());
            assert_eq!(store.path(), path.to_string_lossy());
            store
                .call(|conn| {
                    conn.execute(
                        "INSERT INTO vehicles (name, brand, year) VALUES ('Fusca', 'VW', 1970)",
                        [],
                    )
                })
                .await
                .unwrap();
        }

        let store = Store::new(&path).await.unwrap();
        let name: String = store
            .call(|conn| conn.query_row("SELECT name FROM vehicles WHERE id = 1", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(name, "Fusca");
    }

    #[tokio::test]
    async fn test_unicode_lower_folds_accents() {
        let store = Store::in_memory().await.unwrap();
        let (folded, null): (String, Option<String>) = store
            .call(|conn| {
                conn.query_row(
                    "SELECT unicode_lower('CITROËN ÉPICA'), unicode_lower(NULL)",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
            })
            .await
            .unwrap();
        assert_eq!(folded, "citroën épica");
        assert_eq!(null, None);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(Page::new(None), Page { limit: 10, offset: 0 });
        assert_eq!(Page::new(Some(0)), Page { limit: 10, offset: 0 });
        assert_eq!(Page::new(Some(1)), Page { limit: 10, offset: 0 });
        assert_eq!(Page::new(Some(3)), Page { limit: 10, offset: 20 });
    }
}
