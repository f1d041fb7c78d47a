//! Aeris Core - sensor node domain logic
//!
//! This crate provides:
//! - CSV observation dataset loading and cyclic replay
//! - Cross-calibration of observations against a neighbor
//! - Neighbor identity handling
//! - The shared latest-observation state and its gRPC service
//! - The telemetry loop tying it all together

pub mod calibration;
pub mod dataset;
pub mod neighbor;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-exports for convenience
pub use calibration::calibrate;
pub use dataset::ReadingSet;
pub use neighbor::Neighbor;
pub use service::TelemetryHandler;
pub use state::SensorState;
pub use telemetry::{TelemetryConfig, TelemetryService};
