//! Typed registry API client
//!
//! Wraps `RegistryHttpClient` with methods for the three registry
//! endpoints a node uses: registration, nearest-neighbor lookup, and
//! reading upload.

use aeris_api::{ReadingUpload, RegisterSensorRequest, RegisterSensorResponse, SensorSummary};
use tracing::debug;

use crate::{
    error::Result,
    http::{HttpClientConfig, RegistryHttpClient},
};

/// Typed client for the sensor registry HTTP API
pub struct RegistryApiClient {
    http: RegistryHttpClient,
}

impl RegistryApiClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            http: RegistryHttpClient::new(config)?,
        })
    }

    /// Register this sensor with the registry and return the assigned id.
    pub async fn register(&self, request: &RegisterSensorRequest) -> Result<RegisterSensorResponse> {
        let response: RegisterSensorResponse =
            self.http.post_json("/api/sensors/register", request).await?;
        debug!("Registered sensor, assigned id {}", response.id);
        Ok(response)
    }

    /// Ask the registry for the sensor nearest to `sensor_id`.
    ///
    /// A non-success status means the registry has no answer right now,
    /// which is not an error for the caller; only transport failures are.
    pub async fn nearest(&self, sensor_id: i64) -> Result<Option<SensorSummary>> {
        let path = format!("/api/sensors/{}/nearest", sensor_id);
        let response = self.http.get_response(&path).await?;

        if !response.status().is_success() {
            debug!(
                "Nearest lookup for sensor {} returned status {}",
                sensor_id,
                response.status()
            );
            return Ok(None);
        }

        match response.json::<SensorSummary>().await {
            Ok(summary) => Ok(Some(summary)),
            // An empty or malformed body means "no neighbor yet"
            Err(e) => {
                debug!("Nearest lookup body not usable: {}", e);
                Ok(None)
            }
        }
    }

    /// Upload one reading for `sensor_id`.
    pub async fn publish_reading(&self, sensor_id: i64, reading: &ReadingUpload) -> Result<()> {
        let path = format!("/api/sensors/{}/readings", sensor_id);
        self.http.post_json_unit(&path, reading).await
    }
}
