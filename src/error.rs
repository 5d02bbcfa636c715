//! Error types for holiday-finder

use thiserror::Error;

/// Main error type for holiday-finder operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    #[error("Geocoder unavailable: {0}")]
    ResolverUnavailable(String),

    #[error("Offers API unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unexpected offers API response: {0}")]
    UpstreamSchemaMismatch(String),

    #[error("Comparison address is required unless where-txt param is provided")]
    NoComparisonAddress,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures raised while resolving the reference address
    pub fn is_resolver_failure(&self) -> bool {
        matches!(self, Self::AddressNotFound(_) | Self::ResolverUnavailable(_))
    }
}

/// Result type alias for holiday-finder operations
pub type Result<T> = std::result::Result<T, Error>;
