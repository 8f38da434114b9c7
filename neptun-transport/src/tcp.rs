//! TCP transport

use std::net::SocketAddr;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{debug, trace, warn};

use neptun_core::constants::defaults;

use crate::{error::*, Timeouts, Transport};

/// TCP transport for Neptun controllers
///
/// Opens a fresh connection for every exchange and closes it before
/// returning; nothing is kept between calls.
pub struct TcpTransport {
    host: String,
    port: u16,
    buffer_size: usize,
}

impl TcpTransport {
    /// Create new TCP transport
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            buffer_size: defaults::RECEIVE_BUFFER_SIZE,
        }
    }

    /// Set the size of the single response read
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?
            .collect();

        addrs
            .first()
            .copied()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))
    }

    async fn connect(&self, timeouts: &Timeouts) -> Result<TcpStream> {
        let connect = async {
            let addr = self.resolve_addr().await?;
            debug!("Connecting to {}...", addr);
            let stream = TcpStream::connect(addr).await?;
            Ok::<_, Error>(stream)
        };

        let stream = timeout(timeouts.connect_timeout, connect)
            .await
            .map_err(|_| Error::ConnectionTimeout)??;

        // Disable Nagle's algorithm, frames are tiny
        stream.set_nodelay(true)?;

        Ok(stream)
    }

    async fn transact(&self, stream: &mut TcpStream, frame: &[u8], timeouts: &Timeouts) -> Result<BytesMut> {
        trace!("Sending {} bytes: {:02X?}", frame.len(), &frame[..frame.len().min(16)]);

        stream.write_all(frame).await?;
        stream.flush().await?;

        sleep(timeouts.post_send_delay).await;

        let mut buf = BytesMut::with_capacity(self.buffer_size);

        let n = timeout(timeouts.receive_timeout, stream.read_buf(&mut buf))
            .await
            .map_err(|_| Error::ReadTimeout)?
            .map_err(Error::Io)?;

        if n == 0 {
            return Err(Error::ConnectionClosed);
        }

        trace!("Received {} bytes: {:02X?}", n, &buf[..n.min(16)]);

        Ok(buf)
    }

    /// One attempt; the connection is closed on every path
    async fn try_exchange(&self, frame: &[u8], timeouts: &Timeouts) -> Result<BytesMut> {
        sleep(timeouts.pre_connect_delay).await;

        let mut stream = self.connect(timeouts).await?;
        let result = self.transact(&mut stream, frame, timeouts).await;

        // Graceful shutdown; the socket is released on drop either way
        let _ = stream.shutdown().await;

        result
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn exchange(&self, frame: &[u8], timeouts: &Timeouts) -> Option<BytesMut> {
        match self.try_exchange(frame, timeouts).await {
            Ok(buf) => Some(buf),
            Err(e) => {
                warn!("Exchange with {} failed: {}", self.remote_addr(), e);
                None
            }
        }
    }

    fn remote_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
