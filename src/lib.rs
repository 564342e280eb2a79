//! Todo-All Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - store: Operation facades consumed by the UI layer

use std::path::PathBuf;

pub mod domain;
pub mod repository;
pub mod store;

pub use domain::{DomainError, DomainResult, SortKey, StatusFilter, ThemeMode, Todo};
pub use repository::{init_db, DbState};
pub use store::{ThemeContext, TodoStore};

/// Application state shared across operation handlers
pub struct AppState {
    pub db_state: DbState,
    pub db_path: PathBuf,
}

impl AppState {
    /// Open (or create) the database at the given path and run migrations
    pub async fn init(db_path: PathBuf) -> DomainResult<Self> {
        let db_state = init_db(&db_path).await?;
        Ok(Self { db_state, db_path })
    }

    /// Todo store backed by this state's connection
    pub fn todo_store(&self) -> TodoStore {
        TodoStore::new(self.db_state.conn.clone())
    }

    /// Theme context resolved from this state's preference storage
    pub async fn theme_context(
        &self,
        system_default: Option<ThemeMode>,
    ) -> DomainResult<ThemeContext> {
        ThemeContext::load(self.db_state.conn.clone(), system_default).await
    }
}
