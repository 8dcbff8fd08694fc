//! MongoDB-backed repository tests.
//!
//! Each test starts its own container; run with `cargo test -- --ignored`.

use domain_inventory::{
    Item, ItemError, ItemRepository, ItemService, MongoItemRepository, StreamFilterField,
};
use futures::{StreamExt, TryStreamExt};
use mongodb::bson::{Document, doc};
use test_utils::{TestDataBuilder, TestMongo, assertions};

async fn setup(test_name: &str) -> (TestMongo, MongoItemRepository, TestDataBuilder) {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoItemRepository::open(&mongo.config(&builder.database_name()))
        .await
        .expect("open repository");
    (mongo, repo, builder)
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_add_get_delete_scenario() {
    let (_mongo, repo, _builder) = setup("test_add_get_delete_scenario").await;
    let service = ItemService::new(repo);

    let widget = Item::new("a1", "widget").with_quantity(3);
    service.add_item(widget.clone()).await.unwrap();
    assert_eq!(service.get_item("a1").await.unwrap(), widget);

    service.add_item(Item::new("a2", "gear").with_quantity(0)).await.unwrap();
    service.delete_item("a2").await.unwrap();
    assert!(matches!(service.get_item("a2").await, Err(ItemError::NotFound(_))));
    assert!(matches!(service.delete_item("a2").await, Err(ItemError::NotFound(_))));

    assert_eq!(service.list_items().await.unwrap(), vec![widget]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_documents_use_id_field_not_object_id() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_documents_use_id_field_not_object_id");
    let repo = MongoItemRepository::from_client(mongo.client(), &builder.database_name(), "inventory");
    repo.ping().await.unwrap();

    let id = builder.item_id("main");
    repo.insert(Item::new(&id, "widget")).await.unwrap();

    let raw = mongo
        .database(&builder.database_name())
        .collection::<Document>("inventory")
        .find_one(doc! { "id": id.as_str() })
        .await
        .unwrap();

    let raw = assertions::assert_some(raw, "raw document");
    assert!(raw.get_object_id("_id").is_ok());
    assert_eq!(raw.get_str("name").unwrap(), "widget");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_stream_by_name_and_decode_failure() {
    let (_mongo, repo, _builder) = setup("test_stream_by_name_and_decode_failure").await;
    repo.insert(Item::new("a1", "widget")).await.unwrap();
    repo.insert(Item::new("a2", "widget")).await.unwrap();

    let by_name: Vec<Item> = repo
        .find_matching(StreamFilterField::Name, "widget")
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(by_name.len(), 2);

    repo.collection()
        .clone_with_type::<Document>()
        .insert_one(doc! { "id": "bad", "quantity": "three" })
        .await
        .unwrap();

    let mut cursor = repo.find_matching(StreamFilterField::Id, "bad").await.unwrap();
    assert!(matches!(cursor.next().await, Some(Err(ItemError::Decode(_)))));
    assert!(matches!(repo.list().await, Err(ItemError::Decode(_))));
}
