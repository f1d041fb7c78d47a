//! gRPC server startup

use std::{net::SocketAddr, sync::Arc};

use aeris_api::grpc::SensorTelemetryServer;
use aeris_core::{SensorState, TelemetryHandler};
use tonic::transport::Server;
use tracing::{error, info};

use super::shutdown::ShutdownSignal;

/// Spawn the telemetry gRPC server; it drains when the shutdown signal fires.
pub fn start_grpc_server(
    state: Arc<SensorState>,
    addr: SocketAddr,
    shutdown: ShutdownSignal,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown.subscribe();
        let drain = async move {
            let _ = shutdown_rx.recv().await;
        };

        info!("gRPC telemetry server listening on {}", addr);

        let result = Server::builder()
            .add_service(SensorTelemetryServer::new(TelemetryHandler::new(state)))
            .serve_with_shutdown(addr, drain)
            .await;

        match result {
            Ok(()) => info!("gRPC telemetry server stopped"),
            Err(e) => error!("gRPC telemetry server error: {}", e),
        }
    })
}
