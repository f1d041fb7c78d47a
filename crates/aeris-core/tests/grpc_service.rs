//! End-to-end test of the telemetry gRPC service over a real socket.

use std::sync::Arc;

use aeris_api::{Observation, grpc::SensorTelemetryServer};
use aeris_client::{ClientError, NeighborClient};
use aeris_core::{SensorState, TelemetryHandler};
use tokio_stream::wrappers::TcpListenerStream;

#[tokio::test]
async fn last_reading_over_the_wire() {
    let state = Arc::new(SensorState::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server_state = state.clone();
    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(SensorTelemetryServer::new(TelemetryHandler::new(
                server_state,
            )))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    let mut client = NeighborClient::connect_lazy("127.0.0.1", port).unwrap();

    // Before the first tick the service reports NOT_FOUND
    let err = client.last_reading().await.unwrap_err();
    match err {
        ClientError::Grpc(status) => assert_eq!(status.code(), tonic::Code::NotFound),
        other => panic!("expected gRPC status error, got {other}"),
    }

    state.record(Observation {
        temperature: 21.0,
        pressure: 1009.0,
        humidity: 44.0,
        co: Some(0.2),
        so2: None,
    });

    let reading = client.last_reading().await.unwrap();
    assert_eq!(reading.temperature, 21.0);
    assert_eq!(reading.pressure, 1009.0);
    assert_eq!(reading.co, Some(0.2));
    // Absent SO2 travels as zero and arrives present on the peer side
    assert_eq!(reading.so2, Some(0.0));
}
