//! View Helpers
//!
//! In-memory filtering and sorting the UI layer applies to an already
//! fetched list. Pure functions, no I/O.

use serde::{Deserialize, Serialize};
use super::todo::Todo;

/// Completion-status filter for the home screen footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn keeps(&self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

/// Sort key for list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first by creation time
    #[default]
    Date,
    /// Soonest due first; undated records last
    DueDate,
    /// Case-insensitive by title
    Alphabetical,
    /// Manual ordering key, highest first
    Custom,
}

/// Apply search term and status filter, preserving input order
pub fn filter_todos(todos: &[Todo], search: &str, status: StatusFilter) -> Vec<Todo> {
    let term = search.trim().to_lowercase();
    todos
        .iter()
        .filter(|t| term.is_empty() || t.matches(&term))
        .filter(|t| status.keeps(t))
        .cloned()
        .collect()
}

/// Sort in place by the given key
pub fn apply_sort(todos: &mut [Todo], key: SortKey) {
    match key {
        SortKey::Date => todos.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::DueDate => todos.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortKey::Alphabetical => {
            todos.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::Custom => todos.sort_by(|a, b| b.order.cmp(&a.order)),
    }
}

/// Number of incomplete todos ("N items left")
pub fn active_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|t| !t.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Todo> {
        let mut a = Todo::new(1, "Buy milk".to_string(), 100);
        a.order = 1;
        let mut b = Todo::new(2, "Pay rent".to_string(), 200);
        b.completed = true;
        b.due_date = Some(5000);
        b.order = 2;
        let mut c = Todo::new(3, "apologize to landlord".to_string(), 300);
        c.due_date = Some(1000);
        c.order = 3;
        vec![a, b, c]
    }

    #[test]
    fn test_status_filter() {
        let todos = sample();
        assert_eq!(filter_todos(&todos, "", StatusFilter::All).len(), 3);
        let active = filter_todos(&todos, "", StatusFilter::Active);
        assert_eq!(active.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        let completed = filter_todos(&todos, "", StatusFilter::Completed);
        assert_eq!(completed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_search_filter_combined() {
        let todos = sample();
        let hits = filter_todos(&todos, "RENT", StatusFilter::All);
        assert_eq!(hits.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        // Search and status compose
        let hits = filter_todos(&todos, "rent", StatusFilter::Active);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_sort_date_newest_first() {
        let mut todos = sample();
        apply_sort(&mut todos, SortKey::Date);
        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_due_date_undated_last() {
        let mut todos = sample();
        apply_sort(&mut todos, SortKey::DueDate);
        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_alphabetical_ignores_case() {
        let mut todos = sample();
        apply_sort(&mut todos, SortKey::Alphabetical);
        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_custom_uses_order_key() {
        let mut todos = sample();
        todos[0].order = 10;
        apply_sort(&mut todos, SortKey::Custom);
        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn test_active_count() {
        assert_eq!(active_count(&sample()), 2);
    }
}
