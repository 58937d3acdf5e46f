//! UDP ingress: one datagram is one message.
//!
//! Datagrams longer than `max_message_bytes` are dropped whole with a warning,
//! never logged cut short.

use std::io::ErrorKind;
use std::net::SocketAddr;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::net::UdpSocket;

use logsink_core::error::{LogSinkError, Result};

use super::{Endpoint, Ingress, RawMessage};

#[derive(Debug)]
pub struct UdpIngress {
    socket: UdpSocket,
    local_addr: SocketAddr,
    max_message_bytes: usize,
    /// One byte past the limit so an oversized datagram is detectable.
    buf: Vec<u8>,
}

impl UdpIngress {
    pub async fn bind(endpoint: &Endpoint, max_message_bytes: usize) -> Result<Self> {
        let bind_err = |source| LogSinkError::Bind {
            endpoint: endpoint.to_string(),
            source,
        };
        let socket = UdpSocket::bind(endpoint.authority()).await.map_err(bind_err)?;
        let local_addr = socket.local_addr().map_err(bind_err)?;
        Ok(Self {
            socket,
            local_addr,
            max_message_bytes,
            buf: vec![0; max_message_bytes + 1],
        })
    }
}

#[async_trait]
impl Ingress for UdpIngress {
    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn recv(&mut self) -> Result<RawMessage> {
        loop {
            match self.socket.recv_from(&mut self.buf).await {
                Ok((n, peer)) if n > self.max_message_bytes => {
                    tracing::warn!(%peer, max_message_bytes = self.max_message_bytes, "datagram too large, dropping");
                }
                Ok((n, peer)) => {
                    tracing::trace!(%peer, len = n, "datagram received");
                    return Ok(Bytes::copy_from_slice(&self.buf[..n]));
                }
                // ICMP fallout from earlier traffic; the socket itself is fine.
                Err(e) if matches!(
                    e.kind(),
                    ErrorKind::ConnectionReset | ErrorKind::ConnectionRefused | ErrorKind::Interrupted
                ) => {
                    tracing::debug!(error = %e, "transient udp receive error");
                }
                Err(e) => return Err(LogSinkError::Transport(format!("udp receive failed: {e}"))),
            }
        }
    }
}
