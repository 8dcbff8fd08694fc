//! gRPC server configuration and lifecycle helpers.

mod builder;
mod config;

pub use builder::{GrpcServer, create_health_service, shutdown_signal};
pub use config::ServerConfig;
