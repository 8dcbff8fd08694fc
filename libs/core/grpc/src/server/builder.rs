//! gRPC server utilities.

use super::config::ServerConfig;
use tracing::info;

/// Helpers shared by every tonic binary in the workspace.
///
/// ```ignore
/// let (health_reporter, health_service) = create_health_service();
/// GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
/// ```
pub struct GrpcServer;

impl GrpcServer {
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            compression = config.enable_compression,
            max_message_size = config.max_decoding_message_size,
            "gRPC server starting"
        );
    }

    /// Mark `service_name` and the empty service name as serving.
    ///
    /// The empty name is what `grpc_health_probe` and k8s gRPC probes query
    /// by default.
    pub async fn setup_health(
        health_reporter: &tonic_health::server::HealthReporter,
        service_name: &str,
    ) {
        health_reporter
            .set_service_status(service_name, tonic_health::ServingStatus::Serving)
            .await;
        health_reporter
            .set_service_status("", tonic_health::ServingStatus::Serving)
            .await;

        info!(service = service_name, "Health check service enabled (grpc.health.v1.Health)");
    }
}

pub use tonic_health::server::health_reporter as create_health_service;

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tonic::Request;
    use tonic_health::pb::health_check_response::ServingStatus;
    use tonic_health::pb::health_server::Health;
    use tonic_health::pb::HealthCheckRequest;
    use tonic_health::server::HealthService;

    async fn check(health: &HealthService, service: &str) -> Result<i32, tonic::Status> {
        let request = Request::new(HealthCheckRequest { service: service.to_string() });
        Ok(health.check(request).await?.into_inner().status)
    }

    #[tokio::test]
    async fn test_setup_health_marks_service_serving() {
        let (health_reporter, _health_service) = create_health_service();
        GrpcServer::setup_health(&health_reporter, "inventory.v1.InventoryService").await;

        let health = HealthService::from_health_reporter(health_reporter);
        for service in ["", "inventory.v1.InventoryService"] {
            assert_eq!(check(&health, service).await.unwrap(), ServingStatus::Serving as i32);
        }
        let status = check(&health, "inventory.v1.Unknown").await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }
}
