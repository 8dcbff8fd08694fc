//! Wire <-> domain conversions for `inventory.v1` messages.

use rpc::inventory as proto;

use crate::models::Item;

impl From<proto::Item> for Item {
    fn from(item: proto::Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
            price: item.price,
            category: item.category,
            tags: item.tags,
            attributes: item.attributes,
        }
    }
}

impl From<Item> for proto::Item {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
            price: item.price,
            category: item.category,
            tags: item.tags,
            attributes: item.attributes,
        }
    }
}
