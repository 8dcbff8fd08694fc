//! Item Service - request-to-storage mapping

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, StreamFilterField};
use crate::repository::{ItemCursor, ItemRepository};

/// Item service over an injected repository.
///
/// Each operation is one storage round-trip; absence is reported as
/// [`ItemError::NotFound`], everything else is passed through.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Insert the item verbatim and echo it back
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_item(&self, item: Item) -> ItemResult<Item> {
        self.repository.insert(item).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// Delete one item; deleting nothing is NotFound
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ItemResult<()> {
        match self.repository.delete_by_id(id).await? {
            0 => Err(ItemError::NotFound(id.to_string())),
            _ => Ok(()),
        }
    }

    /// Open a cursor over items whose `field` equals `value`.
    ///
    /// Pacing and cancellation are the caller's concern.
    #[instrument(skip(self))]
    pub async fn stream_items(&self, field: StreamFilterField, value: &str) -> ItemResult<ItemCursor> {
        self.repository.find_matching(field, value).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
