//! gRPC client for pulling a neighbor's last reading
//!
//! Wraps a tonic channel to a peer sensor. Channels are dialed lazily so a
//! neighbor that is still starting up only surfaces as an RPC failure,
//! which the telemetry loop logs and skips.

use aeris_api::{Observation, grpc::SensorTelemetryClient};
use tonic::transport::Channel;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Client for a peer sensor's `SensorTelemetry` service.
pub struct NeighborClient {
    client: SensorTelemetryClient<Channel>,
    endpoint: String,
}

impl NeighborClient {
    /// Create a client for the peer at `ip:port`. Does not connect; the
    /// channel is established on the first RPC.
    pub fn connect_lazy(ip: &str, port: u16) -> Result<Self> {
        let endpoint = endpoint_uri(ip, port);
        debug!("Dialing neighbor telemetry endpoint {}", endpoint);

        let channel = Channel::from_shared(endpoint.clone())
            .map_err(|e| ClientError::Other(anyhow::anyhow!("invalid gRPC address: {}", e)))?
            .connect_lazy();

        Ok(Self {
            client: SensorTelemetryClient::new(channel),
            endpoint,
        })
    }

    /// Pull the neighbor's most recent observation.
    pub async fn last_reading(&mut self) -> Result<Observation> {
        let response = self
            .client
            .get_last_reading(())
            .await?;
        Ok(response.into_inner().into())
    }

    /// The URI this client dials.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build the gRPC endpoint URI for a peer address.
fn endpoint_uri(ip: &str, port: u16) -> String {
    format!("http://{}:{}", ip, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uri() {
        assert_eq!(endpoint_uri("127.0.0.1", 50051), "http://127.0.0.1:50051");
        assert_eq!(endpoint_uri("10.1.2.3", 4000), "http://10.1.2.3:4000");
    }

    #[tokio::test]
    async fn test_connect_lazy_does_not_dial() {
        // Nothing listens on this port; lazy connect must still succeed.
        let client = NeighborClient::connect_lazy("127.0.0.1", 1);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().endpoint(), "http://127.0.0.1:1");
    }
}
