//! Inventory gRPC Service
//!
//! Serves `inventory.v1.InventoryService` over a MongoDB item collection.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd compression)
//! InventoryServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions, ItemError → Status)
//! ItemService (domain layer)
//!   ↓
//! MongoItemRepository (storage gateway)
//!   ↓
//! MongoDB
//! ```
//!
//! `StreamItems` hands its cursor to a producer task (stream.rs) that paces
//! items and stops when the client leaves or its deadline passes.
//!
//! ## Modules
//!
//! - `config`: environment-driven configuration
//! - `server`: server initialization and lifecycle
//! - `service`: gRPC service implementation (InventoryServiceImpl)
//! - `stream`: paced server-streaming producer

pub mod config;
pub mod server;
pub mod service;
pub mod stream;

pub use config::Config;
pub use server::{run, serve_with_listener};
pub use service::InventoryServiceImpl;
