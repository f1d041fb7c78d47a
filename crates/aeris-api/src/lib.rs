//! Aeris API - gRPC and HTTP API definitions
//!
//! This crate provides:
//! - gRPC service definitions (generated from proto)
//! - HTTP registry request/response models
//! - The domain `Observation` type and its wire conversions

pub mod grpc;
pub mod model;
pub mod reading;

// Re-export commonly used types
pub use model::*;
pub use reading::Observation;
