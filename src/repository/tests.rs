//! Repository Integration Tests
//!
//! Tests for TodoRepository and PreferenceRepository with an in-memory
//! SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, Todo};
    use crate::repository::{
        init_db, PreferenceRepository, Repository, SearchableRepository, TodoFilterOperations,
        TodoOrderingOperations, TodoRepository,
    };
    use std::path::PathBuf;

    async fn setup_test_db() -> TodoRepository {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        TodoRepository::new(db_state.conn.clone())
    }

    fn todo(title: &str, now: i64) -> Todo {
        // ID and ordering key are assigned by the repository
        Todo::new(0, title.to_string(), now)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_order() {
        let repo = setup_test_db().await;

        let created = repo.create(&todo("First", 1000)).await.expect("Failed to create");
        assert!(created.id > 0);
        assert_eq!(created.order, 1);
        assert!(!created.completed);

        let second = repo.create(&todo("Second", 2000)).await.unwrap();
        assert_eq!(second.order, 2);
        assert_ne!(second.id, created.id);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = setup_test_db().await;

        let a = repo.create(&todo("A", 1)).await.unwrap();
        let b = repo.create(&todo("B", 2)).await.unwrap();
        let c = repo.create(&todo("C", 3)).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_test_db().await;

        let mut entity = todo("Find me", 500);
        entity.description = Some("somewhere".to_string());
        entity.due_date = Some(9999);
        let created = repo.create(&entity).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed").expect("missing");
        assert_eq!(found.title, "Find me");
        assert_eq!(found.description.as_deref(), Some("somewhere"));
        assert_eq!(found.due_date, Some(9999));
        assert_eq!(found.created_at, 500);

        assert!(repo.find_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_rewrites_fields() {
        let repo = setup_test_db().await;

        let mut created = repo.create(&todo("Original", 100)).await.unwrap();
        created.title = "Updated".to_string();
        created.completed = true;
        created.updated_at = 200;

        let updated = repo.update(&created).await.expect("Update failed");
        assert_eq!(updated.title, "Updated");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Updated");
        assert!(found.completed);
        assert_eq!(found.updated_at, 200);
        assert_eq!(found.created_at, 100);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = setup_test_db().await;

        let ghost = Todo::new(42, "Ghost".to_string(), 0);
        match repo.update(&ghost).await {
            Err(DomainError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|t| t.id)),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let repo = setup_test_db().await;

        let created = repo.create(&todo("To delete", 1)).await.unwrap();
        repo.delete(created.id).await.expect("Delete failed");
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());

        // Second delete of the same id succeeds silently
        repo.delete(created.id).await.expect("Repeat delete should be a no-op");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = setup_test_db().await;

        repo.create(&todo("Buy Milk", 1)).await.unwrap();
        let mut with_desc = todo("Chores", 2);
        with_desc.description = Some("buy MILK and eggs".to_string());
        repo.create(&with_desc).await.unwrap();
        repo.create(&todo("Pay rent", 3)).await.unwrap();

        let hits = repo.search("milk").await.unwrap();
        assert_eq!(hits.len(), 2);

        let all = repo.search("").await.unwrap();
        assert_eq!(all.len(), 3);

        let none = repo.search("garage").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_completed() {
        let repo = setup_test_db().await;

        let mut done = repo.create(&todo("Done", 1)).await.unwrap();
        done.completed = true;
        repo.update(&done).await.unwrap();
        let open = repo.create(&todo("Open", 2)).await.unwrap();

        let completed = repo.filter_by_completed(Some(true)).await.unwrap();
        assert_eq!(completed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![done.id]);

        let active = repo.filter_by_completed(Some(false)).await.unwrap();
        assert_eq!(active.iter().map(|t| t.id).collect::<Vec<_>>(), vec![open.id]);

        // None falls back to the ordered list
        let all = repo.filter_by_completed(None).await.unwrap();
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![open.id, done.id]);
    }

    #[tokio::test]
    async fn test_reorder_applies_batch() {
        let repo = setup_test_db().await;

        let a = repo.create(&todo("A", 1)).await.unwrap();
        let b = repo.create(&todo("B", 2)).await.unwrap();

        repo.reorder(&[(a.id, 10), (b.id, 5)]).await.expect("Reorder failed");

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        let a_after = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a_after.order, 10);
        assert!(a_after.updated_at >= a.updated_at);
    }

    #[tokio::test]
    async fn test_reorder_rolls_back_on_missing_id() {
        let repo = setup_test_db().await;

        let a = repo.create(&todo("A", 1)).await.unwrap();
        let b = repo.create(&todo("B", 2)).await.unwrap();

        let result = repo.reorder(&[(a.id, 100), (999, 50)]).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));

        // The assignment to A must not have survived the failed batch
        let a_after = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a_after.order, a.order);
        let b_after = repo.find_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(b_after.order, b.order);
    }

    #[tokio::test]
    async fn test_clear_completed_exactness() {
        let repo = setup_test_db().await;

        let keep = repo.create(&todo("Keep", 1)).await.unwrap();
        for title in ["Done 1", "Done 2"] {
            let mut t = repo.create(&todo(title, 2)).await.unwrap();
            t.completed = true;
            repo.update(&t).await.unwrap();
        }

        let deleted = repo.clear_completed().await.expect("Clear failed");
        assert_eq!(deleted, 2);

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.iter().map(|t| t.id).collect::<Vec<_>>(), vec![keep.id]);

        // Nothing left to clear
        assert_eq!(repo.clear_completed().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_preferences_save_and_load() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let prefs = PreferenceRepository::new(db_state.conn.clone());

        assert!(prefs.load("theme_mode").await.unwrap().is_none());

        prefs.save("theme_mode", "dark").await.expect("Save failed");
        assert_eq!(prefs.load("theme_mode").await.unwrap().as_deref(), Some("dark"));

        // Overwrite keeps a single row per key
        prefs.save("theme_mode", "light").await.unwrap();
        assert_eq!(prefs.load("theme_mode").await.unwrap().as_deref(), Some("light"));
    }
}
