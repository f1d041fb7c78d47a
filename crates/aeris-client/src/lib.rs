//! Aeris Client - registry and peer communication
//!
//! This crate provides:
//! - HTTP client with retry and failover across registry addresses
//! - Typed registry API methods (register, nearest, publish reading)
//! - gRPC client for pulling a neighbor's last reading

pub mod api;
pub mod error;
pub mod grpc;
pub mod http;

// Re-exports
pub use api::RegistryApiClient;
pub use error::ClientError;
pub use grpc::NeighborClient;
pub use http::{HttpClientConfig, RegistryHttpClient};
