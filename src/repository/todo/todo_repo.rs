//! Todo Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Todo CRUD operations.
//! Specialized operations are in separate modules:
//! - todo_query: Search and status filtering
//! - todo_ordering: Manual ordering key maintenance

use async_trait::async_trait;
use rusqlite::{params, Connection};

use super::super::db::SharedConnection;
use super::super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Todo};

/// SQLite implementation of the Todo repository
pub struct TodoRepository {
    pub(super) conn: SharedConnection,
}

impl TodoRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Delete every completed todo, returning the number removed
    pub async fn clear_completed(&self) -> DomainResult<usize> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        let deleted = conn
            .execute("DELETE FROM todos WHERE completed = 1", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        log::info!("cleared {} completed todos", deleted);
        Ok(deleted)
    }
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    async fn create(&self, entity: &Todo) -> DomainResult<Todo> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        // The ordering key is assigned inside the INSERT so a new record
        // always lands above every existing one, without re-indexing.
        conn.execute(
            "INSERT INTO todos (title, description, completed, due_date, created_at, updated_at, display_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, (SELECT COALESCE(MAX(display_order), 0) + 1 FROM todos))",
            params![
                entity.title,
                entity.description,
                if entity.completed { 1 } else { 0 },
                entity.due_date,
                entity.created_at,
                entity.updated_at,
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid();
        query_by_id(conn, id)?
            .ok_or(DomainError::Internal("inserted row not found".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Todo>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        query_by_id(conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, title, description, completed, due_date, created_at, updated_at, display_order
                 FROM todos ORDER BY display_order DESC",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut todos = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            todos.push(row_to_todo(row)?);
        }
        Ok(todos)
    }

    async fn update(&self, entity: &Todo) -> DomainResult<Todo> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        let affected = conn
            .execute(
                "UPDATE todos SET title = ?1, description = ?2, completed = ?3, due_date = ?4,
                 updated_at = ?5, display_order = ?6 WHERE id = ?7",
                params![
                    entity.title,
                    entity.description,
                    if entity.completed { 1 } else { 0 },
                    entity.due_date,
                    entity.updated_at,
                    entity.order,
                    entity.id,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("Todo {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        // Deleting an id that is already gone is a no-op success
        conn.execute("DELETE FROM todos WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

pub(super) fn query_by_id(conn: &Connection, id: i64) -> DomainResult<Option<Todo>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, description, completed, due_date, created_at, updated_at, display_order
             FROM todos WHERE id = ?",
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let mut rows = stmt
        .query(params![id])
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    if let Ok(Some(row)) = rows.next() {
        Ok(Some(row_to_todo(row)?))
    } else {
        Ok(None)
    }
}

/// Convert a database row to Todo
pub(super) fn row_to_todo(row: &rusqlite::Row) -> DomainResult<Todo> {
    Ok(Todo {
        id: row.get::<_, i64>(0).map_err(|e| DomainError::Internal(e.to_string()))?,
        title: row.get::<_, String>(1).map_err(|e| DomainError::Internal(e.to_string()))?,
        description: row.get::<_, Option<String>>(2).map_err(|e| DomainError::Internal(e.to_string()))?,
        completed: row.get::<_, i64>(3).map_err(|e| DomainError::Internal(e.to_string()))? != 0,
        due_date: row.get::<_, Option<i64>>(4).map_err(|e| DomainError::Internal(e.to_string()))?,
        created_at: row.get::<_, i64>(5).map_err(|e| DomainError::Internal(e.to_string()))?,
        updated_at: row.get::<_, i64>(6).map_err(|e| DomainError::Internal(e.to_string()))?,
        order: row.get::<_, i64>(7).map_err(|e| DomainError::Internal(e.to_string()))?,
    })
}
