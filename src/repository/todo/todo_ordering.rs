//! Todo Ordering Operations
//!
//! Maintenance of the manual ordering key. New records get their key at
//! insert time; this module covers the bulk rewrite after a drag-reorder.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult};

/// Trait for ordering-key maintenance
#[async_trait]
pub trait TodoOrderingOperations {
    /// Apply a batch of (id, order) assignments atomically.
    ///
    /// All-or-nothing: any id missing from the table rolls the whole
    /// batch back. Every affected record's updated_at is refreshed.
    async fn reorder(&self, updates: &[(i64, i64)]) -> DomainResult<()>;
}

#[async_trait]
impl TodoOrderingOperations for super::todo_repo::TodoRepository {
    async fn reorder(&self, updates: &[(i64, i64)]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        let now = chrono::Utc::now().timestamp_millis();

        // Dropping the transaction without commit rolls it back, so the
        // early NotFound return below undoes any assignments already made.
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        for (id, order) in updates {
            let affected = tx
                .execute(
                    "UPDATE todos SET display_order = ?1, updated_at = ?2 WHERE id = ?3",
                    params![order, now, id],
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;

            if affected == 0 {
                return Err(DomainError::NotFound(format!("Todo {} not found", id)));
            }
        }

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        log::debug!("reordered {} todos", updates.len());
        Ok(())
    }
}
