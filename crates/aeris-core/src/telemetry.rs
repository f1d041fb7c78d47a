//! The telemetry loop
//!
//! One tick, every `tick_interval`:
//! 1. periodically re-discover the nearest neighbor,
//! 2. pull the neighbor's last raw observation over gRPC,
//! 3. replay the next dataset row and record it as our own last reading,
//! 4. calibrate against the neighbor when its data carries signal,
//! 5. publish the result to the registry.
//!
//! Neighbor and publish failures are logged and skipped; only a shutdown
//! signal ends the loop.

use std::{sync::Arc, time::Duration};

use aeris_api::{Observation, ReadingUpload};
use aeris_client::{NeighborClient, RegistryApiClient};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{calibration::calibrate, dataset::ReadingSet, neighbor::Neighbor, state::SensorState};

/// Tunables for the telemetry loop.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Interval between ticks.
    pub tick_interval: Duration,
    /// Re-discover the nearest neighbor every this many ticks.
    pub neighbor_refresh_ticks: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(aeris_common::DEFAULT_TICK_INTERVAL_MS),
            neighbor_refresh_ticks: aeris_common::DEFAULT_NEIGHBOR_REFRESH_TICKS,
        }
    }
}

/// A connected neighbor together with the last observation pulled from it.
struct NeighborLink {
    info: Neighbor,
    client: NeighborClient,
    last_seen: Option<Observation>,
}

impl NeighborLink {
    fn connect(info: Neighbor) -> Option<Self> {
        match NeighborClient::connect_lazy(&info.ip, info.port) {
            Ok(client) => Some(Self {
                info,
                client,
                last_seen: None,
            }),
            Err(e) => {
                warn!("Cannot dial neighbor {}: {}", info, e);
                None
            }
        }
    }

    async fn pull(&mut self) {
        match self.client.last_reading().await {
            Ok(observation) => self.last_seen = Some(observation),
            Err(e) => warn!(
                "Failed to get reading from neighbor {}: {}",
                self.info.id, e
            ),
        }
    }
}

/// Drives one sensor node's reading generation and publishing.
pub struct TelemetryService {
    api: Arc<RegistryApiClient>,
    sensor_id: i64,
    readings: ReadingSet,
    state: Arc<SensorState>,
    neighbor: Option<NeighborLink>,
    config: TelemetryConfig,
    active_ticks: u64,
    refresh_counter: u64,
}

impl TelemetryService {
    pub fn new(
        api: Arc<RegistryApiClient>,
        sensor_id: i64,
        readings: ReadingSet,
        state: Arc<SensorState>,
        initial_neighbor: Option<Neighbor>,
        config: TelemetryConfig,
    ) -> Self {
        Self {
            api,
            sensor_id,
            readings,
            state,
            neighbor: initial_neighbor.and_then(NeighborLink::connect),
            config,
            active_ticks: 0,
            refresh_counter: 0,
        }
    }

    /// Run until the shutdown signal fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        info!(
            "Telemetry loop started for sensor {} ({} dataset rows, tick every {:?})",
            self.sensor_id,
            self.readings.len(),
            self.config.tick_interval
        );

        loop {
            self.refresh_counter += 1;
            if self.refresh_counter >= self.config.neighbor_refresh_ticks {
                self.refresh_counter = 0;
                self.refresh_neighbor().await;
            }

            if let Some(link) = self.neighbor.as_mut() {
                link.pull().await;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.tick_interval) => {}
                _ = shutdown.recv() => {
                    info!("Telemetry loop for sensor {} stopping", self.sensor_id);
                    break;
                }
            }

            self.active_ticks += 1;
            let own = self.readings.row_for_tick(self.active_ticks);
            self.state.record(own);

            let peer = self.neighbor.as_ref().and_then(|link| link.last_seen);
            let published = observation_to_publish(own, peer);

            let upload = ReadingUpload::from(published);
            info!(
                "Sensor {} publishing reading: temp={}, pressure={}, humidity={}, co={}, so2={}",
                self.sensor_id,
                upload.temperature,
                upload.pressure,
                upload.humidity,
                upload.co,
                upload.so2
            );

            if let Err(e) = self.api.publish_reading(self.sensor_id, &upload).await {
                warn!("Failed to publish reading for sensor {}: {}", self.sensor_id, e);
            }
        }
    }

    /// Re-query the registry for the nearest sensor; reconnect if it changed.
    async fn refresh_neighbor(&mut self) {
        let summary = match self.api.nearest(self.sensor_id).await {
            Ok(Some(summary)) => summary,
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to refresh neighbor: {}", e);
                return;
            }
        };

        let Some(info) = Neighbor::from_summary(&summary, self.sensor_id) else {
            return;
        };

        let changed = self
            .neighbor
            .as_ref()
            .map(|link| link.info.id != info.id)
            .unwrap_or(true);

        if changed {
            info!("Sensor {} updated neighbor: {}", self.sensor_id, info);
            if let Some(link) = NeighborLink::connect(info) {
                self.neighbor = Some(link);
            }
        }
    }
}

/// Decide what to publish for this tick: the raw row, or the row calibrated
/// against the neighbor's observation when that observation carries signal.
fn observation_to_publish(own: Observation, peer: Option<Observation>) -> Observation {
    match peer {
        Some(peer) if peer.has_signal() => calibrate(&own, &peer),
        Some(_) => {
            debug!("Skipping calibration because neighbor data is not yet valid");
            own
        }
        None => own,
    }
}
