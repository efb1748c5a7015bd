//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection is shared
//! behind a tokio mutex; repositories clone the `Arc`.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (or create) the database at `path` and run migrations
pub fn open_db(path: &Path) -> DomainResult<SharedConnection> {
    let conn = Connection::open(path)
        .map_err(|e| DomainError::Internal(format!("failed to open database: {}", e)))?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database, used by tests
pub fn open_in_memory() -> DomainResult<SharedConnection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| DomainError::Internal(format!("failed to open database: {}", e)))?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS icons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            kind TEXT NOT NULL DEFAULT 'link',
            url TEXT,
            image_file TEXT,
            material_icon_name TEXT,
            background_color TEXT,
            parent_id INTEGER,
            position INTEGER NOT NULL DEFAULT 0,
            owner_id INTEGER NOT NULL,
            image_size INTEGER,
            created_at INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_icons_parent ON icons(parent_id);
        CREATE INDEX IF NOT EXISTS idx_icons_owner_parent ON icons(owner_id, parent_id);",
    )
    .map_err(|e| DomainError::Internal(format!("failed to run migrations: {}", e)))?;

    Ok(())
}
