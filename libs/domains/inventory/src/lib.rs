//! Inventory Domain
//!
//! Maps inventory requests onto a MongoDB collection of item documents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← get/delete absence → NotFound
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB gateway + in-memory store
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, stream settings
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::MongoConfig;
//! use domain_inventory::{ItemService, MongoItemRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::new("mongodb://localhost:27017");
//! let repository = MongoItemRepository::open(&config).await?;
//! let service = ItemService::new(repository);
//!
//! let item = service.get_item("a1").await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use models::{DEFAULT_STREAM_PACING, Item, StreamFilterField, StreamSettings};
pub use crate::mongodb::MongoItemRepository;
pub use repository::{InMemoryItemRepository, ItemCursor, ItemRepository};
pub use service::ItemService;
