//! Main entry point for the Aeris sensor node.
//!
//! Startup sequence: load configuration, initialize logging, register with
//! the registry, look up the initial neighbor, load the replay dataset,
//! then run the telemetry loop and the gRPC telemetry server until a
//! shutdown signal arrives.

mod config;
mod startup;

use std::{net::SocketAddr, sync::Arc};

use aeris_api::RegisterSensorRequest;
use aeris_client::{HttpClientConfig, RegistryApiClient};
use aeris_core::{Neighbor, ReadingSet, SensorState, TelemetryService};
use anyhow::Context;
use rand::Rng;
use tracing::{info, warn};

use crate::config::Configuration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new();
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    // Registry client
    let http_config = HttpClientConfig::with_servers(configuration.registry_addrs())
        .with_timeouts(
            configuration.registry_connect_timeout_ms(),
            configuration.registry_read_timeout_ms(),
        );
    let api = Arc::new(RegistryApiClient::new(http_config)?);

    // Identity: position, advertised address, gRPC port
    let (latitude, longitude) = position(&configuration);
    let ip = configuration.advertised_ip();
    let grpc_port = match configuration.grpc_port() {
        Some(port) => port,
        None => aeris_common::ephemeral_port().context("no available gRPC port")?,
    };

    info!(
        "Sensor starting at [lat={:.5}, lon={:.5}] using gRPC port {}",
        latitude, longitude, grpc_port
    );

    // Load the replay dataset before registering so a bad path fails fast
    let readings = ReadingSet::load_csv(configuration.readings_csv()?)?;

    // Register with the registry; this is the one startup step that must succeed
    let registration = RegisterSensorRequest::new(latitude, longitude, ip, grpc_port);
    let response = api
        .register(&registration)
        .await
        .context("failed to register with registry")?;
    let sensor_id = response.id;
    info!("Registered sensor with id {}", sensor_id);

    // Initial neighbor lookup; absence is normal for the first node
    let initial_neighbor = match api.nearest(sensor_id).await {
        Ok(Some(summary)) => Neighbor::from_summary(&summary, sensor_id),
        Ok(None) => None,
        Err(e) => {
            warn!("Initial neighbor lookup failed: {}", e);
            None
        }
    };
    match &initial_neighbor {
        Some(neighbor) => info!("Sensor {} has neighbor: {}", sensor_id, neighbor),
        None => info!("No neighbor found at this moment"),
    }

    let state = Arc::new(SensorState::new());
    let shutdown = startup::wait_for_shutdown_signal().await;

    let telemetry = TelemetryService::new(
        api,
        sensor_id,
        readings,
        state.clone(),
        initial_neighbor,
        configuration.telemetry_config(),
    );
    let telemetry_handle = tokio::spawn(telemetry.run(shutdown.subscribe()));

    let addr: SocketAddr = format!("0.0.0.0:{grpc_port}").parse()?;
    let server_handle = startup::start_grpc_server(state, addr, shutdown);

    let _ = tokio::join!(telemetry_handle, server_handle);
    info!("Sensor {} shut down", sensor_id);

    Ok(())
}

/// Configured coordinates, or a random position inside the deployment region.
fn position(configuration: &Configuration) -> (f64, f64) {
    let mut rng = rand::rng();
    let latitude = configuration.latitude().unwrap_or_else(|| {
        rng.random_range(config::REGION_LAT_MIN..config::REGION_LAT_MIN + config::REGION_LAT_SPAN)
    });
    let longitude = configuration.longitude().unwrap_or_else(|| {
        rng.random_range(config::REGION_LON_MIN..config::REGION_LON_MIN + config::REGION_LON_SPAN)
    });
    (latitude, longitude)
}
