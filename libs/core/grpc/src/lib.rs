//! # gRPC server helpers
//!
//! Shared plumbing for tonic servers in this workspace:
//!
//! - [`ServerConfig`]: bind address, compression and message limits from env
//! - [`GrpcServer`]: startup logging and `grpc.health.v1.Health` registration
//! - [`Deadline`]: the caller's `grpc-timeout`, for work that outlives the
//!   handler future (server-streaming producers)
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_server::{GrpcServer, ServerConfig, shutdown_signal};
//! use rpc::inventory::inventory_service_server::{InventoryServiceServer, SERVICE_NAME};
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = tonic_health::server::health_reporter();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! tonic::transport::Server::builder()
//!     .add_service(health_service)
//!     .add_service(InventoryServiceServer::new(my_impl))
//!     .serve_with_shutdown(config.socket_addr()?, shutdown_signal())
//!     .await?;
//! ```

pub mod deadline;
pub mod server;

pub use deadline::{Deadline, parse_grpc_timeout};
pub use server::{GrpcServer, ServerConfig, create_health_service, shutdown_signal};
