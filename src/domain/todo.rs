//! Todo Entity
//!
//! A single task with title, optional description, completion flag,
//! optional due date and an integer ordering key. The ordering key
//! alone determines list position; it is independent of creation time.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// Maximum title length in characters (after trimming)
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A todo record
///
/// Serialized with camelCase field names, which is the wire shape the
/// UI layer consumes. All timestamps are epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, assigned by the store; never reused
    pub id: i64,
    /// Task title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Completion status
    pub completed: bool,
    /// Optional due date (epoch milliseconds)
    pub due_date: Option<i64>,
    /// Set once at creation
    pub created_at: i64,
    /// Refreshed on every successful mutation
    pub updated_at: i64,
    /// Manual sort key; higher sorts first
    pub order: i64,
}

impl Todo {
    /// Create a new incomplete todo with both timestamps set to `now`
    pub fn new(id: i64, title: String, now: i64) -> Self {
        Self {
            id,
            title,
            description: None,
            completed: false,
            due_date: None,
            created_at: now,
            updated_at: now,
            order: 0,
        }
    }

    /// Case-insensitive substring match against title and description.
    ///
    /// `term_lower` must already be lowercased by the caller.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.title.to_lowercase().contains(term_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(term_lower))
    }
}

impl Entity for Todo {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validate and normalize a title: trimmed, non-empty, bounded length.
///
/// Returns the trimmed title on success.
pub fn validate_title(title: &str) -> DomainResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput("title must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidInput(format!(
            "title exceeds {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a description's length
pub fn validate_description(description: &str) -> DomainResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::InvalidInput(format!(
            "description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}
