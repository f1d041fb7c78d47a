//! gRPC `SensorTelemetry` service implementation
//!
//! Thin handler serving the most recent raw observation out of the shared
//! sensor state.

use std::sync::Arc;

use aeris_api::grpc::{Reading, SensorTelemetry};
use tonic::{Request, Response, Status};

use crate::state::SensorState;

/// Serves `GetLastReading` for peer sensors.
pub struct TelemetryHandler {
    state: Arc<SensorState>,
}

impl TelemetryHandler {
    pub fn new(state: Arc<SensorState>) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl SensorTelemetry for TelemetryHandler {
    async fn get_last_reading(
        &self,
        _request: Request<()>,
    ) -> Result<Response<Reading>, Status> {
        match self.state.last() {
            Some(observation) => Ok(Response::new(observation.into())),
            None => Err(Status::not_found("no reading recorded yet")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeris_api::Observation;

    #[tokio::test]
    async fn test_not_found_before_first_tick() {
        let handler = TelemetryHandler::new(Arc::new(SensorState::new()));

        let status = handler
            .get_last_reading(Request::new(()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_serves_recorded_observation() {
        let state = Arc::new(SensorState::new());
        state.record(Observation {
            temperature: 23.0,
            pressure: 1008.0,
            humidity: 52.0,
            co: Some(0.3),
            so2: None,
        });

        let handler = TelemetryHandler::new(state);
        let reading = handler
            .get_last_reading(Request::new(()))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(reading.temperature, 23.0);
        assert_eq!(reading.co, 0.3);
        // Absent gas encodes as zero on the wire
        assert_eq!(reading.so2, 0.0);
    }
}
