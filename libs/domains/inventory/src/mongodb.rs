//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use database::mongodb::{Client, Collection, MongoConfig, connect_from_config};
use futures::{StreamExt, TryStreamExt};
use mongodb::bson::{Document, doc};
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, StreamFilterField};
use crate::repository::{ItemCursor, ItemRepository};

/// Storage gateway: one client and the bound item collection.
#[derive(Clone)]
pub struct MongoItemRepository {
    client: Client,
    collection: Collection<Item>,
}

impl MongoItemRepository {
    /// Connect, ping and bind to the configured database and collection.
    ///
    /// Fails if the connection string is invalid or the server does not
    /// answer `ping`; the caller decides whether to abort startup.
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::new("mongodb://localhost:27017");
    /// let repo = MongoItemRepository::open(&config).await?;
    /// ```
    #[instrument(skip(config), fields(database = %config.database(), collection = %config.collection()))]
    pub async fn open(config: &MongoConfig) -> ItemResult<Self> {
        let client = connect_from_config(config).await?;
        let collection = client
            .database(config.database())
            .collection::<Item>(config.collection());

        tracing::info!("Item collection bound");
        Ok(Self { client, collection })
    }

    /// Bind to `collection` in `database` on an already connected client.
    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Item>(collection);
        Self { client, collection }
    }

    /// Round-trip `ping` against the bound database.
    pub async fn ping(&self) -> ItemResult<()> {
        let namespace = self.collection.namespace();
        database::mongodb::ping(&self.client, &namespace.db).await?;
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    fn filter_by(field: StreamFilterField, value: &str) -> Document {
        let mut filter = Document::new();
        filter.insert(field.as_str(), value);
        filter
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        self.collection.insert_one(&item).await?;

        tracing::info!("Item inserted");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ItemResult<Option<Item>> {
        let filter = Self::filter_by(StreamFilterField::Id, id);
        let item = self.collection.find_one(filter).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let cursor = self.collection.find(doc! {}).await?;
        let items: Vec<Item> = cursor.try_collect().await?;

        tracing::debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> ItemResult<u64> {
        let filter = Self::filter_by(StreamFilterField::Id, id);
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count > 0 {
            tracing::info!("Item deleted");
        }
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn find_matching(&self, field: StreamFilterField, value: &str) -> ItemResult<ItemCursor> {
        let cursor = self.collection.find(Self::filter_by(field, value)).await?;
        Ok(cursor.map_err(ItemError::from).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_id() {
        let filter = MongoItemRepository::filter_by(StreamFilterField::Id, "a1");
        assert_eq!(filter, doc! { "id": "a1" });
    }

    #[test]
    fn test_filter_by_name() {
        let filter = MongoItemRepository::filter_by(StreamFilterField::Name, "widget");
        assert_eq!(filter, doc! { "name": "widget" });
        assert!(!filter.contains_key("_id"));
    }

    #[tokio::test]
    async fn test_open_unreachable_server_is_connection_error() {
        let config = MongoConfig {
            connect_timeout_secs: 1,
            server_selection_timeout_secs: 1,
            ..MongoConfig::new("mongodb://127.0.0.1:1")
        };

        let result = MongoItemRepository::open(&config).await;
        assert!(matches!(result, Err(ItemError::Connection(_))));
    }
}
