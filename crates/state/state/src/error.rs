use thiserror::Error;

/// Errors from the key-value persistence layer.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    CapacityExceeded { needed: usize, limit: usize },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}
