//! HTTP registry API models.
//!
//! Request/response structures for sensor registration, nearest-neighbor
//! lookup, and reading upload.

use serde::{Deserialize, Serialize};

use crate::reading::Observation;

/// Registration request a node sends once at startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterSensorRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub port: u16,
    pub ip: String,
}

impl RegisterSensorRequest {
    pub fn new(latitude: f64, longitude: f64, ip: String, port: u16) -> Self {
        Self {
            latitude,
            longitude,
            port,
            ip,
        }
    }
}

/// Registration response. The registry returns a full sensor object; only
/// the assigned id matters to the node, unknown fields are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterSensorResponse {
    pub id: i64,
}

/// A sensor as described by the registry (nearest-neighbor lookups).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSummary {
    pub id: i64,
    pub ip: String,
    pub port: u16,
    pub latitude: f64,
    pub longitude: f64,
}

/// Reading upload payload. Gas fields flatten to 0.0 when absent, matching
/// what peers see over gRPC.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingUpload {
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub co: f64,
    pub so2: f64,
}

impl From<Observation> for ReadingUpload {
    fn from(obs: Observation) -> Self {
        Self {
            temperature: obs.temperature,
            pressure: obs.pressure,
            humidity: obs.humidity,
            co: obs.co.unwrap_or_default(),
            so2: obs.so2.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_keys() {
        let req = RegisterSensorRequest::new(45.78, 15.91, "127.0.0.1".to_string(), 50051);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["latitude"], 45.78);
        assert_eq!(json["longitude"], 15.91);
        assert_eq!(json["port"], 50051);
        assert_eq!(json["ip"], "127.0.0.1");
    }

    #[test]
    fn test_register_response_tolerates_unknown_fields() {
        let body = r#"{"id": 7, "latitude": 45.8, "longitude": 15.9, "neighbor": null}"#;
        let resp: RegisterSensorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.id, 7);
    }

    #[test]
    fn test_sensor_summary_deserialize() {
        let body = r#"{"id": 3, "ip": "10.0.0.5", "port": 50123, "latitude": 45.76, "longitude": 15.88}"#;
        let summary: SensorSummary = serde_json::from_str(body).unwrap();
        assert_eq!(summary.id, 3);
        assert_eq!(summary.ip, "10.0.0.5");
        assert_eq!(summary.port, 50123);
    }

    #[test]
    fn test_reading_upload_from_observation() {
        let obs = Observation {
            temperature: 20.0,
            pressure: 1010.0,
            humidity: 45.0,
            co: None,
            so2: Some(0.01),
        };
        let upload = ReadingUpload::from(obs);
        assert_eq!(upload.co, 0.0);
        assert_eq!(upload.so2, 0.01);

        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["co"], 0.0);
        assert_eq!(json["temperature"], 20.0);
    }
}
