//! Transport layer (one-way ingress).
//!
//! Exposes the `Ingress` seam the lifecycle loop receives from, plus the TCP
//! and UDP adapters behind it. Nothing is ever written back to senders.

pub mod codec;
pub mod endpoint;
pub mod tcp;
pub mod udp;

use std::net::SocketAddr;

use async_trait::async_trait;
use bytes::Bytes;

use logsink_core::error::Result;

pub use endpoint::{Endpoint, Scheme};
pub use tcp::TcpIngress;
pub use udp::UdpIngress;

/// Opaque message bytes as delivered by the transport.
pub type RawMessage = Bytes;

/// A bound receive side. `recv` waits without timeout for the next message.
#[async_trait]
pub trait Ingress: Send {
    fn local_addr(&self) -> SocketAddr;
    async fn recv(&mut self) -> Result<RawMessage>;
}

#[async_trait]
impl<T: Ingress + ?Sized> Ingress for Box<T> {
    fn local_addr(&self) -> SocketAddr {
        (**self).local_addr()
    }

    async fn recv(&mut self) -> Result<RawMessage> {
        (**self).recv().await
    }
}

/// Bind the adapter for `endpoint.scheme`.
pub async fn bind(endpoint: &Endpoint, max_message_bytes: usize) -> Result<Box<dyn Ingress>> {
    let ingress: Box<dyn Ingress> = match endpoint.scheme {
        Scheme::Tcp => Box::new(TcpIngress::bind(endpoint, max_message_bytes).await?),
        Scheme::Udp => Box::new(UdpIngress::bind(endpoint, max_message_bytes).await?),
    };
    tracing::info!(%endpoint, local_addr = %ingress.local_addr(), "ingress bound");
    Ok(ingress)
}
