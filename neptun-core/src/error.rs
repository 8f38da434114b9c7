//! Error types for neptun-core

/// Result type alias for neptun operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Status response is too short to decode
    #[error("Response too short: expected at least {expected} bytes, got {actual} bytes")]
    ResponseTooShort {
        expected: usize,
        actual: usize,
    },

    /// Payload does not fit the 16-bit length field
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Invalid argument for a data type
    #[error(transparent)]
    Types(#[from] neptun_types::Error),
}
