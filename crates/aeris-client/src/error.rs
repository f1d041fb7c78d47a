//! Client error types for Aeris registry and peer communication

/// Error type for registry and neighbor client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("gRPC error: {0}")]
    Grpc(#[from] tonic::Status),

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned error: status={status}, body={body}")]
    RegistryError { status: u16, body: String },

    #[error("connection not ready")]
    NotConnected,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
