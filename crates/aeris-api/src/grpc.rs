//! Generated gRPC bindings for the `sensor.v1` telemetry service.

pub mod sensor {
    include!(concat!(env!("OUT_DIR"), "/sensor.v1.rs"));
}

pub use sensor::{
    Reading,
    sensor_telemetry_client::SensorTelemetryClient,
    sensor_telemetry_server::{SensorTelemetry, SensorTelemetryServer},
};
