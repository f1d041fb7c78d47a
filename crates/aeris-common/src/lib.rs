//! Aeris Common - Shared types and utilities
//!
//! This crate provides the foundational pieces used across all Aeris
//! components:
//! - Error types
//! - Utility functions (local IP discovery, ephemeral port probing)

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::AerisError;
pub use utils::{ephemeral_port, local_ip};

/// Default registry server address a node talks to when none is configured.
pub const DEFAULT_REGISTRY_ADDR: &str = "http://localhost:8080";

/// Default interval between telemetry ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Default number of ticks between neighbor re-discovery queries.
pub const DEFAULT_NEIGHBOR_REFRESH_TICKS: u64 = 10;
