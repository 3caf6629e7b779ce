use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The heap state of a new context could not be obtained.
    #[error("failed to allocate {size} bytes for digest context")]
    Allocation { size: usize },
    /// The context has been destroyed and no longer accepts operations.
    #[error("cannot {operation}: digest context has been destroyed")]
    InvalidState { operation: &'static str },
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),
}

pub type Result<T> = std::result::Result<T, Error>;
