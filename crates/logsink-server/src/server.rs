//! Server assembly: startup ordering and the top-level run.
//!
//! Startup is fail-fast and ordered: validate config, open the store, then
//! bind the ingress. An unwritable store therefore never binds the endpoint.

use std::net::SocketAddr;

use tokio::io::{AsyncWrite, Stdout};

use logsink_core::error::Result;

use crate::config::ServerConfig;
use crate::lifecycle::Controller;
use crate::obs::SinkStats;
use crate::sink::DurableSink;
use crate::transport::{self, Ingress};

/// Why the receive loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A terminate directive arrived.
    Terminated,
    /// Ctrl-C.
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reason: StopReason,
    pub stats: SinkStats,
}

pub struct Server<W = Stdout> {
    controller: Controller<Box<dyn Ingress>, W>,
}

impl Server<Stdout> {
    /// Open the store and bind the ingress, echoing to stdout.
    pub async fn bind(cfg: &ServerConfig) -> Result<Self> {
        Self::bind_with_console(cfg, tokio::io::stdout()).await
    }
}

impl<W: AsyncWrite + Unpin + Send> Server<W> {
    pub async fn bind_with_console(cfg: &ServerConfig, console: W) -> Result<Self> {
        cfg.validate()?;
        let endpoint = cfg.ingress.endpoint()?;

        tracing::info!(
            endpoint = %endpoint,
            store = %cfg.store.path.display(),
            append = cfg.store.append,
            echo = cfg.echo.initial,
            "logsink-server starting"
        );

        let sink = DurableSink::open(&cfg.store.path, cfg.store.append).await?;
        let ingress = transport::bind(&endpoint, cfg.ingress.max_message_bytes).await?;

        Ok(Self {
            controller: Controller::new(ingress, sink, cfg.echo.initial, console),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.controller.local_addr()
    }

    /// Run until a terminate directive or Ctrl-C.
    pub async fn run(mut self) -> Result<RunSummary> {
        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "ctrl-c handler unavailable");
                std::future::pending::<()>().await;
            }
        };

        let reason = tokio::select! {
            res = self.controller.run() => {
                res?;
                StopReason::Terminated
            }
            _ = interrupted => {
                tracing::info!("interrupted, shutting down");
                StopReason::Interrupted
            }
        };

        let stats = self.controller.stats().clone();
        stats.log_summary();
        tracing::info!(store = %self.controller.sink().path().display(), "server exiting");
        Ok(RunSummary { reason, stats })
    }
}
