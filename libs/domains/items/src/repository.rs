use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item};

/// Persistence for items.
///
/// Implementations must tolerate concurrent calls on distinct ids; the batch
/// processor issues one `get_by_id` + `save` pair per id from many tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every item, ordered by id
    async fn list_all(&self) -> ItemResult<Vec<Item>>;

    /// Every id, ascending
    async fn list_ids(&self) -> ItemResult<Vec<i64>>;

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Insert a new item; the store assigns the id
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    /// Overwrite an existing item. Fails with `NotFound` if the id is absent.
    async fn save(&self, item: Item) -> ItemResult<Item>;

    /// Returns `true` if a row was removed
    async fn delete(&self, id: i64) -> ItemResult<bool>;
}

#[derive(Debug)]
struct Store {
    items: BTreeMap<i64, Item>,
    next_id: i64,
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                items: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.items.is_empty()
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_all(&self) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn list_ids(&self) -> ItemResult<Vec<i64>> {
        let store = self.store.read().await;
        Ok(store.items.keys().copied().collect())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let item = Item {
            id,
            name: input.name,
            description: input.description,
            status: input.status,
            email: input.email,
        };
        store.items.insert(id, item.clone());

        tracing::info!(item_id = id, "Created item");
        Ok(item)
    }

    async fn save(&self, item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        let slot = store
            .items
            .get_mut(&item.id)
            .ok_or(ItemError::NotFound(item.id))?;
        *slot = item.clone();

        Ok(item)
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let mut store = self.store.write().await;

        if store.items.remove(&id).is_some() {
            tracing::info!(item_id = id, "Deleted item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> CreateItem {
        CreateItem::new(name, "test item", "owner@example.com")
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(input("a")).await.unwrap();
        let second = repo.create(input("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, "NEW");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryItemRepository::new();
        repo.create(input("a")).await.unwrap();
        let b = repo.create(input("b")).await.unwrap();

        assert!(repo.delete(b.id).await.unwrap());
        let c = repo.create(input("c")).await.unwrap();

        assert_eq!(c.id, 3);
        assert_eq!(repo.list_ids().await.unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_list_all_is_ordered_by_id() {
        let repo = InMemoryItemRepository::new();
        for name in ["c", "a", "b"] {
            repo.create(input(name)).await.unwrap();
        }

        let names: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let repo = InMemoryItemRepository::new();
        let mut item = repo.create(input("a")).await.unwrap();

        item.status = "ARCHIVED".to_string();
        repo.save(item.clone()).await.unwrap();

        let stored = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "ARCHIVED");
    }

    #[tokio::test]
    async fn test_save_missing_is_not_found() {
        let repo = InMemoryItemRepository::new();
        let ghost = Item {
            id: 42,
            name: "ghost".to_string(),
            description: "never stored".to_string(),
            status: "NEW".to_string(),
            email: "ghost@example.com".to_string(),
        };

        assert_eq!(repo.save(ghost).await, Err(ItemError::NotFound(42)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryItemRepository::new();
        assert!(!repo.delete(1).await.unwrap());
    }
}
