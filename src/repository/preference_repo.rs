//! Preference Repository
//!
//! String key-value persistence for user preferences (theme mode).

use rusqlite::params;

use super::db::SharedConnection;
use crate::domain::{DomainError, DomainResult};

pub struct PreferenceRepository {
    conn: SharedConnection,
}

impl PreferenceRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn save(&self, key: &str, value: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }

    pub async fn load(&self, key: &str) -> DomainResult<Option<String>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Unavailable("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT value FROM preferences WHERE key = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![key])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            let value = row
                .get::<_, String>(0)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}
