//! Todo Repository Module
//!
//! Core CRUD plus the query and ordering extensions.

mod todo_ordering;
mod todo_query;
mod todo_repo;

pub use todo_ordering::TodoOrderingOperations;
pub use todo_query::TodoFilterOperations;
pub use todo_repo::TodoRepository;
