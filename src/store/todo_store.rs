//! Todo Store
//!
//! The operation facade the UI layer calls. Owns record identity and the
//! consistency of the ordering key; validates input before any write
//! rather than trusting the calling screen to do it.

use crate::domain::{
    validate_description, validate_title, DomainError, DomainResult, Todo,
};
use crate::repository::{
    Repository, SearchableRepository, SharedConnection, TodoFilterOperations,
    TodoOrderingOperations, TodoRepository,
};

pub struct TodoStore {
    repo: TodoRepository,
}

impl TodoStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            repo: TodoRepository::new(conn),
        }
    }

    /// All todos, newest-first by ordering key
    pub async fn list(&self) -> DomainResult<Vec<Todo>> {
        self.repo.list().await
    }

    /// Todos whose title or description contains the term,
    /// case-insensitively. An empty term returns everything.
    pub async fn search(&self, term: &str) -> DomainResult<Vec<Todo>> {
        self.repo.search(term).await
    }

    /// Todos with the given completion status; `None` lists everything
    pub async fn filter_by_status(&self, completed: Option<bool>) -> DomainResult<Vec<Todo>> {
        self.repo.filter_by_completed(completed).await
    }

    /// Create a new todo, returning its id.
    ///
    /// The new record sorts above all existing ones.
    pub async fn create(
        &self,
        title: &str,
        description: Option<String>,
        due_date: Option<i64>,
    ) -> DomainResult<i64> {
        let title = validate_title(title)?;
        let description = normalize_description(description)?;

        let now = chrono::Utc::now().timestamp_millis();
        let mut todo = Todo::new(0, title, now);
        todo.description = description;
        todo.due_date = due_date;

        let created = self.repo.create(&todo).await?;
        Ok(created.id)
    }

    /// Partial update: only supplied fields change, omitted fields are
    /// left untouched. Refreshes updated_at.
    pub async fn update(
        &self,
        id: i64,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<i64>,
    ) -> DomainResult<i64> {
        let existing = self.find_existing(id).await?;

        let updated = Todo {
            id: existing.id,
            title: match title {
                Some(t) => validate_title(&t)?,
                None => existing.title,
            },
            description: match description {
                Some(d) => normalize_description(Some(d))?,
                None => existing.description,
            },
            completed: existing.completed,
            due_date: due_date.or(existing.due_date),
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().timestamp_millis(),
            order: existing.order,
        };

        self.repo.update(&updated).await?;
        Ok(id)
    }

    /// Flip the completion flag
    pub async fn toggle(&self, id: i64) -> DomainResult<i64> {
        let mut todo = self.find_existing(id).await?;

        todo.completed = !todo.completed;
        todo.updated_at = chrono::Utc::now().timestamp_millis();

        self.repo.update(&todo).await?;
        Ok(id)
    }

    /// Delete a todo. Deleting an id that no longer exists is a no-op
    /// success.
    pub async fn remove(&self, id: i64) -> DomainResult<i64> {
        self.repo.delete(id).await?;
        Ok(id)
    }

    /// Apply a batch of (id, order) assignments from a drag-reorder.
    /// All-or-nothing; readers never observe a partial application.
    pub async fn reorder(&self, updates: &[(i64, i64)]) -> DomainResult<bool> {
        self.repo.reorder(updates).await?;
        Ok(true)
    }

    /// Delete every completed todo, returning the count removed
    pub async fn clear_completed(&self) -> DomainResult<usize> {
        self.repo.clear_completed().await
    }

    async fn find_existing(&self, id: i64) -> DomainResult<Todo> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound(format!("Todo {} not found", id)))
    }
}

/// Trim a supplied description; empty collapses to None
fn normalize_description(description: Option<String>) -> DomainResult<Option<String>> {
    match description {
        Some(d) => {
            let trimmed = d.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                validate_description(trimmed)?;
                Ok(Some(trimmed.to_string()))
            }
        }
        None => Ok(None),
    }
}
