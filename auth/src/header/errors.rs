use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("No authorization header provided")]
    NoAuthHeader,

    #[error("Malformed authorization header")]
    Malformed,
}
