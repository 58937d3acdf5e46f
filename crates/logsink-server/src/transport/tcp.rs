//! TCP ingress.
//!
//! Any number of senders may connect. Each connection gets a reader task that
//! frames newline-delimited messages (see `codec`) and forwards them, in
//! order, into one bounded channel. `recv` drains that channel, so the
//! lifecycle loop still sees a single serialized stream. Reader tasks belong
//! to the accept task, so dropping the ingress closes every sender socket.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use logsink_core::error::{LogSinkError, Result};

use super::codec::{read_frame, Frame};
use super::{Endpoint, Ingress, RawMessage};

const CHANNEL_CAPACITY: usize = 1024;
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct TcpIngress {
    rx: mpsc::Receiver<RawMessage>,
    local_addr: SocketAddr,
    accept_task: JoinHandle<()>,
}

impl TcpIngress {
    pub async fn bind(endpoint: &Endpoint, max_message_bytes: usize) -> Result<Self> {
        let bind_err = |source| LogSinkError::Bind {
            endpoint: endpoint.to_string(),
            source,
        };
        let listener = TcpListener::bind(endpoint.authority()).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let accept_task = tokio::spawn(accept_loop(listener, tx, max_message_bytes));

        Ok(Self {
            rx,
            local_addr,
            accept_task,
        })
    }
}

impl Drop for TcpIngress {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

#[async_trait]
impl Ingress for TcpIngress {
    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn recv(&mut self) -> Result<RawMessage> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| LogSinkError::Transport("tcp accept loop stopped".into()))
    }
}

async fn accept_loop(listener: TcpListener, tx: mpsc::Sender<RawMessage>, max_message_bytes: usize) {
    // Dropped (and every reader aborted) when this task is aborted.
    let mut readers = JoinSet::new();
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::debug!(%peer, "sender connected");
                    readers.spawn(read_connection(stream, peer, tx.clone(), max_message_bytes));
                }
                Err(e) => {
                    // Usually fd exhaustion; back off instead of spinning.
                    tracing::warn!(error = %e, "accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            },
            // Reap finished readers so the set does not grow.
            Some(_) = readers.join_next(), if !readers.is_empty() => {}
        }
    }
}

async fn read_connection(
    stream: TcpStream,
    peer: SocketAddr,
    tx: mpsc::Sender<RawMessage>,
    max_message_bytes: usize,
) {
    let mut reader = BufReader::new(stream);
    loop {
        match read_frame(&mut reader, max_message_bytes).await {
            Ok(Frame::Message(msg)) => {
                if tx.send(msg).await.is_err() {
                    // Receiver dropped: server is shutting down.
                    return;
                }
            }
            Ok(Frame::Eof) => {
                tracing::debug!(%peer, "sender disconnected");
                return;
            }
            Ok(Frame::TooLarge) => {
                tracing::warn!(%peer, max_message_bytes, "message too large, dropping connection");
                return;
            }
            Err(e) => {
                tracing::warn!(%peer, error = %e, "read failed, dropping connection");
                return;
            }
        }
    }
}
