//! Database Connection and Setup
//!
//! Manages the SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection handle shared by all repositories.
///
/// `None` until initialization completes; operations against an
/// uninitialized handle fail with `DomainError::Unavailable`.
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
pub struct DbState {
    pub conn: SharedConnection,
    db_path: PathBuf,
}

impl DbState {
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Initialize the database at the given path and run migrations
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Unavailable(format!("Failed to open db: {}", e)))?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    run_migrations(&conn)?;
    log::info!("database initialized at {}", db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(Some(conn))),
        db_path: db_path.to_path_buf(),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    if let Ok(mut stmt) = conn.prepare(&query) {
        if let Ok(mut rows) = stmt.query([]) {
            while let Ok(Some(row)) = rows.next() {
                if let Ok(name) = row.get::<_, String>(1) {
                    if name == column {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // Todos table - create if not exists.
    // ORDER is an SQL keyword, so the ordering key column is display_order.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            display_order INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Add due_date column if it doesn't exist
    if !column_exists(conn, "todos", "due_date") {
        conn.execute("ALTER TABLE todos ADD COLUMN due_date INTEGER", [])
            .map_err(|e| DomainError::Internal(format!("Failed to add due_date: {}", e)))?;
    }

    // Indexes for ordered retrieval and status filtering
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_order ON todos(display_order)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos(completed)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Key-value preferences (theme mode lives here)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
