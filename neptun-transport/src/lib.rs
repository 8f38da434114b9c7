//! Transport layer for the Neptun protocol
//!
//! Provides the TCP exchange with the controller and the retry loop around it.
//! The controller expects one short-lived connection per command.

pub mod error;
pub mod retry;
pub mod tcp;
pub mod timeouts;

pub use error::{Error, Result};
pub use retry::RetryPolicy;
pub use tcp::TcpTransport;
pub use timeouts::Timeouts;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for a single request/response exchange
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one frame and wait for the response
    ///
    /// Every failure (connect, write, read, timeout) is logged and reported
    /// as `None`; an empty read also counts as no response.
    async fn exchange(&self, frame: &[u8], timeouts: &Timeouts) -> Option<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
