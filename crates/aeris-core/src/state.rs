//! Shared latest-observation state
//!
//! The telemetry loop writes here; the gRPC service reads. The stored
//! value is the raw replayed row for the current tick, recorded before
//! calibration, so peers always calibrate against raw observations.

use aeris_api::Observation;
use parking_lot::RwLock;

/// Holder for the most recent raw observation.
#[derive(Debug, Default)]
pub struct SensorState {
    last_reading: RwLock<Option<Observation>>,
}

impl SensorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the observation for the current tick.
    pub fn record(&self, observation: Observation) {
        *self.last_reading.write() = Some(observation);
    }

    /// The most recent observation, if any tick has run yet.
    pub fn last(&self) -> Option<Observation> {
        *self.last_reading.read()
    }
}
