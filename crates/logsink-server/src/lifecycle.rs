//! Lifecycle Controller: the single receive loop.
//!
//! `Running -> ShuttingDown` is the only transition and it is driven by a
//! terminate directive arriving on the same stream it stops. Messages are
//! handled strictly one at a time: classify, apply, write + sync, echo. The
//! next `recv` does not start before the previous record is on disk.

use tokio::io::AsyncWrite;

use logsink_core::error::Result;
use logsink_core::{classify, Directive, LogRecord};

use crate::obs::SinkStats;
use crate::sink::{Console, DurableSink, EchoGate};
use crate::transport::{Ingress, RawMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    /// Terminal.
    ShuttingDown,
}

pub struct Controller<I, W> {
    ingress: I,
    sink: DurableSink,
    echo: EchoGate,
    console: Console<W>,
    state: LifecycleState,
    stats: SinkStats,
}

impl<I, W> Controller<I, W>
where
    I: Ingress,
    W: AsyncWrite + Unpin + Send,
{
    /// Both the ingress and the sink are already open, so this starts in `Running`.
    pub fn new(ingress: I, sink: DurableSink, echo_initial: bool, console: W) -> Self {
        Self {
            ingress,
            sink,
            echo: EchoGate::new(echo_initial),
            console: Console::new(console),
            state: LifecycleState::Running,
            stats: SinkStats::default(),
        }
    }

    /// Receive and handle messages until a terminate directive arrives.
    ///
    /// Transport and persistence errors end the loop and are returned as is.
    pub async fn run(&mut self) -> Result<()> {
        while self.state == LifecycleState::Running {
            let msg = self.ingress.recv().await?;
            self.handle(msg).await?;
        }
        Ok(())
    }

    /// Handle one message. A no-op once shutting down.
    pub async fn handle(&mut self, msg: RawMessage) -> Result<LifecycleState> {
        if self.state == LifecycleState::ShuttingDown {
            return Ok(self.state);
        }

        let directive = classify(&msg);
        self.stats.observe(directive);

        if !directive.is_logged() {
            // Pure control: not logged, not echoed, echo state untouched.
            tracing::info!(len = msg.len(), "terminate directive received, shutting down");
            self.state = LifecycleState::ShuttingDown;
            return Ok(self.state);
        }

        if directive != Directive::None {
            tracing::debug!(directive = directive.as_str(), "echo directive");
        }
        self.echo.apply(directive);

        let record = LogRecord::new(msg);
        self.sink.write(&record).await?;
        self.stats.logged += 1;
        tracing::trace!(len = record.content().len(), "record written");

        if self.echo.should_echo() && self.console.mirror(&record).await {
            self.stats.echoed += 1;
        }

        Ok(self.state)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn echo(&self) -> &EchoGate {
        &self.echo
    }

    pub fn stats(&self) -> &SinkStats {
        &self.stats
    }

    pub fn sink(&self) -> &DurableSink {
        &self.sink
    }

    pub fn console(&self) -> &W {
        self.console.get_ref()
    }

    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.ingress.local_addr()
    }
}
