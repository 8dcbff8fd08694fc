//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing initialization
//! - Storage gateway connection
//! - Service creation
//! - gRPC server configuration and startup
//! - Health check service (grpc.health.v1.Health)
//! - Server reflection (grpc.reflection.v1)

use domain_inventory::{ItemRepository, ItemService, MongoItemRepository};
use eyre::{Result, WrapErr};
use grpc_server::{GrpcServer, create_health_service, shutdown_signal};
use rpc::inventory::FILE_DESCRIPTOR_SET;
use rpc::inventory::inventory_service_server::{InventoryServiceServer, SERVICE_NAME};
use std::future::Future;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::info;

use crate::config::Config;
use crate::service::InventoryServiceImpl;

/// Run the gRPC server
///
/// 1. Loads configuration from the environment
/// 2. Sets up structured logging (JSON for prod, pretty for dev)
/// 3. Opens the storage gateway (connect + ping, no retry)
/// 4. Serves until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - MongoDB is unreachable or rejects `ping`
/// - The listener cannot bind
/// - The server fails at runtime
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    core_config::tracing::init_tracing(&config.environment);

    info!(
        database = config.mongodb.database(),
        collection = config.mongodb.collection(),
        "Connecting to MongoDB..."
    );
    let repository = MongoItemRepository::open(&config.mongodb)
        .await
        .wrap_err("Failed to open item store")?;

    let addr = config
        .grpc
        .socket_addr()
        .wrap_err_with(|| format!("Failed to parse server address: {}", config.grpc.addr_string()))?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    serve_with_listener(&config, repository, listener, shutdown_signal()).await
}

/// Serve `InventoryService`, `grpc.health.v1.Health` and server reflection on
/// an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener<R, F>(
    config: &Config,
    repository: R,
    listener: TcpListener,
    shutdown: F,
) -> Result<()>
where
    R: ItemRepository + 'static,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .register_encoded_file_descriptor_set(tonic_health::pb::FILE_DESCRIPTOR_SET)
        .build_v1()
        .wrap_err("Failed to build reflection service")?;

    let inventory = InventoryServiceImpl::new(ItemService::new(repository), config.stream);
    let mut inventory_server = InventoryServiceServer::new(inventory)
        .max_decoding_message_size(config.grpc.max_decoding_message_size)
        .max_encoding_message_size(config.grpc.max_encoding_message_size);
    if config.grpc.enable_compression {
        inventory_server = inventory_server
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    GrpcServer::log_startup(&config.grpc, SERVICE_NAME);
    if let Ok(local_addr) = listener.local_addr() {
        info!(%local_addr, "InventoryService listening");
    }

    Server::builder()
        .add_service(health_service)
        .add_service(reflection_service)
        .add_service(inventory_server)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
        .wrap_err("gRPC server failed")?;

    info!("gRPC server stopped");
    Ok(())
}
