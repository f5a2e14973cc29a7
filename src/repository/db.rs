//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection handle shared by all repositories
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub db_path: PathBuf,
}

impl DbState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            db_path,
        }
    }

    /// Clone of the shared connection handle for a repository
    pub fn shared(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }

    pub async fn is_initialized(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the connection; repositories report "not initialized" afterwards
    pub async fn close(&self) {
        self.conn.lock().await.take();
    }
}

/// Duplicate primary or unique keys become Conflict; every other failure is Internal
pub(super) fn sql_err(e: rusqlite::Error) -> DomainError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &e {
        let duplicate_key = failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE;
        if duplicate_key {
            return DomainError::Conflict(e.to_string());
        }
    }
    DomainError::Internal(e.to_string())
}

pub(super) fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

/// Initialize database with path (`:memory:` for a private in-memory database)
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory().map_err(sql_err)?
    } else {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        Connection::open(db_path).map_err(sql_err)?
    };

    run_migrations(&conn)?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);

    log::info!("Database ready at {}", db_path.display());
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    let found = names.flatten().any(|name| name == column);
    found
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS menu_items (
            id TEXT PRIMARY KEY,
            store_id TEXT NOT NULL,
            name TEXT NOT NULL,
            price_cents INTEGER NOT NULL DEFAULT 0,
            sold_out INTEGER NOT NULL DEFAULT 0,
            kiosk_enabled INTEGER NOT NULL DEFAULT 0,
            display_order INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(sql_err)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS category_markers (
            id TEXT PRIMARY KEY,
            store_id TEXT NOT NULL,
            name TEXT NOT NULL,
            display_order INTEGER NOT NULL,
            anchor_item_id TEXT
        )",
        [],
    )
    .map_err(sql_err)?;

    // Change tracking columns arrived after the first schema
    for table in ["menu_items", "category_markers"] {
        if !column_exists(conn, table, "updated_at") {
            conn.execute(&format!("ALTER TABLE {} ADD COLUMN updated_at INTEGER", table), [])
                .map_err(|e| DomainError::Internal(format!("Failed to add updated_at to {}: {}", table, e)))?;
        }
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_menu_items_store ON menu_items(store_id, display_order)",
        [],
    )
    .map_err(sql_err)?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_category_markers_store ON category_markers(store_id)",
        [],
    )
    .map_err(sql_err)?;

    Ok(())
}
