//! Node startup: logging, gRPC server, graceful shutdown.

pub mod grpc;
pub mod logging;
pub mod shutdown;

pub use grpc::start_grpc_server;
pub use logging::{LoggingConfig, init_logging};
pub use shutdown::{ShutdownSignal, wait_for_shutdown_signal};
