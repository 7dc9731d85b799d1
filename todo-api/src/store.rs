//! In-memory todo collection.
//!
//! # Design
//! Items live in a `Vec` so insertion order is what `list` returns. Lookups
//! are linear scans by id. Each operation holds the lock for its whole
//! scan-and-mutate step, so concurrent updates and deletes cannot interleave.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::ApiError,
    types::{TodoInput, TodoItem},
};

/// Shared handle to the collection. Cloning is cheap and every clone sees the
/// same items.
#[derive(Clone, Debug, Default)]
pub struct TodoStore {
    items: Arc<RwLock<Vec<TodoItem>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items, in insertion order.
    pub async fn list(&self) -> Vec<TodoItem> {
        self.items.read().await.clone()
    }

    /// Stores `input` under a fresh UUID and appends it.
    pub async fn create(&self, input: TodoInput) -> TodoItem {
        let item = input.into_item(Uuid::new_v4().to_string());
        self.items.write().await.push(item.clone());
        tracing::info!(id = %item.id, "created todo");
        item
    }

    /// Replaces the item with `id` in place.
    ///
    /// The `id` argument always wins: whatever id `input` carries is
    /// discarded, so a record can never be renamed through an update.
    pub async fn update(&self, id: &str, input: TodoInput) -> Result<TodoItem, ApiError> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ApiError::NotFound)?;
        *slot = input.into_item(id.to_string());
        tracing::info!(id, "updated todo");
        Ok(slot.clone())
    }

    /// Removes the item with `id`, keeping the order of the rest.
    pub async fn delete(&self, id: &str) -> Result<TodoItem, ApiError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ApiError::NotFound)?;
        let removed = items.remove(index);
        tracing::info!(id, "deleted todo");
        Ok(removed)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn input(json: &str) -> TodoInput {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = TodoStore::new();
        assert!(store.list().await.is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() {
        let store = TodoStore::new();
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let item = store
                .create(input(r#"{"id":"same-every-time","title":"t"}"#))
                .await;
            assert!(!item.id.is_empty());
            assert_ne!(item.id, "same-every-time");
            assert!(seen.insert(item.id));
        }
        assert_eq!(store.len().await, 20);
    }

    #[tokio::test]
    async fn create_accepts_empty_and_duplicate_titles() {
        let store = TodoStore::new();
        let a = store.create(input(r#"{"title":""}"#)).await;
        let b = store.create(input(r#"{"title":""}"#)).await;
        assert_eq!(a.title, "");
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = TodoStore::new();
        for title in ["first", "second", "third"] {
            store.create(input(&format!(r#"{{"title":"{title}"}}"#))).await;
        }
        let titles: Vec<_> = store.list().await.into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_position() {
        let store = TodoStore::new();
        store.create(input(r#"{"title":"a"}"#)).await;
        let target = store
            .create(input(r#"{"title":"b","description":"old"}"#))
            .await;
        store.create(input(r#"{"title":"c"}"#)).await;

        let updated = store
            .update(
                &target.id,
                input(r#"{"id":"hijack","title":"B","completed":true}"#),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, target.id);
        assert_eq!(updated.title, "B");
        assert!(updated.completed);
        // full replacement: omitted description is cleared
        assert!(updated.description.is_none());

        let list = store.list().await;
        assert_eq!(list[1], updated);
        assert_eq!(list[0].title, "a");
        assert_eq!(list[2].title, "c");
    }

    #[tokio::test]
    async fn update_missing_id_leaves_collection_unchanged() {
        let store = TodoStore::new();
        store.create(input(r#"{"title":"keep"}"#)).await;
        let before = store.list().await;

        let err = store
            .update("does-not-exist", input(r#"{"title":"x"}"#))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::NotFound);
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_second_delete_fails() {
        let store = TodoStore::new();
        let a = store.create(input(r#"{"title":"a"}"#)).await;
        let b = store.create(input(r#"{"title":"b"}"#)).await;
        let c = store.create(input(r#"{"title":"c"}"#)).await;

        let removed = store.delete(&b.id).await.unwrap();
        assert_eq!(removed.id, b.id);

        let ids: Vec<_> = store.list().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, [a.id, c.id]);

        assert_eq!(store.delete(&b.id).await.unwrap_err(), ApiError::NotFound);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn clones_share_the_collection() {
        let store = TodoStore::new();
        let other = store.clone();
        let item = store.create(input(r#"{"title":"shared"}"#)).await;
        assert_eq!(other.list().await, vec![item]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_are_not_lost() {
        let store = TodoStore::new();
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(input(&format!(r#"{{"title":"t{i}"}}"#)))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 50);
    }
}
