//! Todo Query Operations
//!
//! Text search and completion-status filtering over the todos table.

use async_trait::async_trait;
use rusqlite::params;

use super::super::traits::{Repository, SearchableRepository};
use crate::domain::{DomainError, DomainResult, Todo};

/// Trait for status-filtered retrieval
#[async_trait]
pub trait TodoFilterOperations {
    /// Todos whose completed flag equals the given value.
    /// `None` behaves as an unfiltered ordered list.
    async fn filter_by_completed(&self, completed: Option<bool>) -> DomainResult<Vec<Todo>>;
}

#[async_trait]
impl SearchableRepository<Todo> for super::todo_repo::TodoRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Todo>> {
        // Full scan with an in-process match. SQL LIKE is only
        // case-insensitive for ASCII, so lowercasing happens here.
        let todos = self.list().await?;

        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Ok(todos);
        }

        Ok(todos.into_iter().filter(|t| t.matches(&term)).collect())
    }
}

#[async_trait]
impl TodoFilterOperations for super::todo_repo::TodoRepository {
    async fn filter_by_completed(&self, completed: Option<bool>) -> DomainResult<Vec<Todo>> {
        let completed = match completed {
            Some(c) => c,
            None => return self.list().await,
        };

        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        // Walks the completed index; relative order is not part of the
        // contract here.
        let mut stmt = conn
            .prepare(
                "SELECT id, title, description, completed, due_date, created_at, updated_at, display_order
                 FROM todos WHERE completed = ?",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![if completed { 1 } else { 0 }])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut todos = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            todos.push(super::todo_repo::row_to_todo(row)?);
        }
        Ok(todos)
    }
}
