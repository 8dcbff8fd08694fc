use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ItemResult;
use crate::models::{Item, StreamFilterField};

/// Open cursor over matching items. Dropping it releases the cursor.
pub type ItemCursor = BoxStream<'static, ItemResult<Item>>;

/// Repository trait for Item persistence
///
/// Every method is a single storage round-trip, apart from
/// [`ItemRepository::find_matching`] whose cursor is advanced by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert the item as-is and return it
    async fn insert(&self, item: Item) -> ItemResult<Item>;

    /// First item whose `id` equals `id`
    async fn find_by_id(&self, id: &str) -> ItemResult<Option<Item>>;

    /// Every stored item, in storage order
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Delete at most one item whose `id` equals `id`; returns the number removed
    async fn delete_by_id(&self, id: &str) -> ItemResult<u64>;

    /// Open a cursor over items whose `field` equals `value`
    async fn find_matching(&self, field: StreamFilterField, value: &str) -> ItemResult<ItemCursor>;
}

/// In-memory implementation of ItemRepository (for development/testing)
///
/// Keeps insertion order and, like the collection, allows duplicate ids.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<Vec<Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        self.items.write().await.push(item.clone());

        tracing::info!(item_id = %item.id, "Inserted item");
        Ok(item)
    }

    async fn find_by_id(&self, id: &str) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn list(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn delete_by_id(&self, id: &str) -> ItemResult<u64> {
        let mut items = self.items.write().await;

        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                tracing::info!(item_id = %id, "Deleted item");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_matching(&self, field: StreamFilterField, value: &str) -> ItemResult<ItemCursor> {
        let matches: Vec<ItemResult<Item>> = self
            .items
            .read()
            .await
            .iter()
            .filter(|item| field.matches(item, value))
            .cloned()
            .map(Ok)
            .collect();

        Ok(futures::stream::iter(matches).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn test_in_memory_insert_and_find() {
        let repo = InMemoryItemRepository::new();
        let item = Item::new("a1", "widget").with_quantity(3);

        let inserted = repo.insert(item.clone()).await.unwrap();
        assert_eq!(inserted, item);

        let found = repo.find_by_id("a1").await.unwrap();
        assert_eq!(found, Some(item));
        assert_eq!(repo.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_allows_duplicate_ids() {
        let repo = InMemoryItemRepository::new();
        repo.insert(Item::new("a1", "first")).await.unwrap();
        repo.insert(Item::new("a1", "second")).await.unwrap();

        assert_eq!(repo.len().await, 2);
        // Lookup returns the first match
        assert_eq!(repo.find_by_id("a1").await.unwrap().unwrap().name, "first");

        // Delete removes exactly one
        assert_eq!(repo.delete_by_id("a1").await.unwrap(), 1);
        assert_eq!(repo.find_by_id("a1").await.unwrap().unwrap().name, "second");
    }

    #[tokio::test]
    async fn test_in_memory_delete_missing() {
        let repo = InMemoryItemRepository::new();
        assert_eq!(repo.delete_by_id("missing").await.unwrap(), 0);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_in_memory_list_keeps_insertion_order() {
        let repo = InMemoryItemRepository::new();
        for id in ["c", "a", "b"] {
            repo.insert(Item::new(id, id)).await.unwrap();
        }

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_in_memory_find_matching_by_field() {
        let repo = InMemoryItemRepository::new();
        repo.insert(Item::new("a1", "widget")).await.unwrap();
        repo.insert(Item::new("a2", "widget")).await.unwrap();
        repo.insert(Item::new("a3", "gear")).await.unwrap();

        let by_name: Vec<Item> = repo
            .find_matching(StreamFilterField::Name, "widget")
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);

        let by_id: Vec<Item> = repo
            .find_matching(StreamFilterField::Id, "a3")
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(by_id, vec![Item::new("a3", "gear")]);
    }
}
