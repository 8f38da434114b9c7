//! High-level error types
//!
//! Used inside [`Device`](crate::Device) to carry the reason a step failed.
//! The public device operations log these and report `false`.

use neptun_core::ResponseClass;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] neptun_core::Error),

    #[error("Type error: {0}")]
    Types(#[from] neptun_types::Error),

    #[error("No response after {attempts} attempts")]
    NoResponse { attempts: usize },

    #[error("Device rejected the command: {0}")]
    Rejected(ResponseClass),

    #[error("Valve state not confirmed: expected open={expected}, got open={actual}")]
    NotConfirmed { expected: bool, actual: bool },
}

impl Error {
    /// Check if the device never answered (as opposed to answering badly)
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::NoResponse { .. })
    }
}
