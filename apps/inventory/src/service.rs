use domain_inventory::{ItemError, ItemRepository, ItemService, StreamSettings};
use grpc_server::Deadline;
use rpc::inventory::{
    AddItemRequest, AddItemResponse, DeleteItemRequest, DeleteItemResponse, GetItemRequest,
    GetItemResponse, HealthRequest, HealthResponse, ListItemsRequest, ListItemsResponse,
    inventory_service_server::InventoryService,
};
use tonic::{Request, Response, Status};
use tracing::info;

use crate::stream::{ItemStream, spawn_producer};

pub const HEALTHY_STATUS: &str = "Service is healthy";

pub struct InventoryServiceImpl<R>
where
    R: ItemRepository + 'static,
{
    service: ItemService<R>,
    stream: StreamSettings,
}

impl<R> InventoryServiceImpl<R>
where
    R: ItemRepository + 'static,
{
    pub fn new(service: ItemService<R>, stream: StreamSettings) -> Self {
        Self { service, stream }
    }
}

#[tonic::async_trait]
impl<R> InventoryService for InventoryServiceImpl<R>
where
    R: ItemRepository + 'static,
{
    async fn add_item(
        &self,
        request: Request<AddItemRequest>,
    ) -> Result<Response<AddItemResponse>, Status> {
        let item = request
            .into_inner()
            .item
            .ok_or(ItemError::MissingPayload)
            .map_err(|e| e.into_status("Failed to add item"))?;

        let item = self
            .service
            .add_item(item.into())
            .await
            .map_err(|e| e.into_status("Failed to add item"))?;

        Ok(Response::new(AddItemResponse {
            item: Some(item.into()),
        }))
    }

    async fn get_item(
        &self,
        request: Request<GetItemRequest>,
    ) -> Result<Response<GetItemResponse>, Status> {
        let id = request.into_inner().id;

        let item = self
            .service
            .get_item(&id)
            .await
            .map_err(|e| e.into_status("Failed to fetch item"))?;

        Ok(Response::new(GetItemResponse {
            item: Some(item.into()),
        }))
    }

    async fn list_items(
        &self,
        _request: Request<ListItemsRequest>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        let items = self.service.list_items().await.map_err(|e| {
            let context = match &e {
                ItemError::Decode(_) => "Failed to decode item",
                _ => "Failed to list items",
            };
            e.into_status(context)
        })?;

        Ok(Response::new(ListItemsResponse {
            items: items.into_iter().map(Into::into).collect(),
        }))
    }

    async fn delete_item(
        &self,
        request: Request<DeleteItemRequest>,
    ) -> Result<Response<DeleteItemResponse>, Status> {
        let id = request.into_inner().id;

        self.service
            .delete_item(&id)
            .await
            .map_err(|e| e.into_status("Failed to delete item"))?;

        Ok(Response::new(DeleteItemResponse { success: true }))
    }

    async fn health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        Ok(Response::new(HealthResponse {
            status: HEALTHY_STATUS.to_string(),
        }))
    }

    type StreamItemsStream = ItemStream;

    async fn stream_items(
        &self,
        request: Request<GetItemRequest>,
    ) -> Result<Response<Self::StreamItemsStream>, Status> {
        let deadline = Deadline::from_request(&request);
        let value = request.into_inner().id;

        let cursor = self
            .service
            .stream_items(self.stream.filter_field, &value)
            .await
            .map_err(|e| e.into_status("Failed to query items"))?;

        info!(
            filter = %self.stream.filter_field,
            value = %value,
            pacing = ?self.stream.pacing,
            "Item stream started"
        );
        let (stream, _producer) = spawn_producer(cursor, self.stream.pacing, deadline);

        Ok(Response::new(stream))
    }
}
