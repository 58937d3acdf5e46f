//! Echo Gate and the console it mirrors to.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use logsink_core::{Directive, LogRecord};

/// Echo on/off. Only echo directives change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoGate {
    enabled: bool,
}

impl EchoGate {
    pub fn new(initial: bool) -> Self {
        Self { enabled: initial }
    }

    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::EchoEnable => self.enabled = true,
            Directive::EchoDisable => self.enabled = false,
            Directive::None | Directive::Terminate => {}
        }
    }

    pub fn should_echo(&self) -> bool {
        self.enabled
    }
}

/// Non-durable mirror of written records (stdout in the binary).
#[derive(Debug)]
pub struct Console<W> {
    out: W,
}

impl<W: AsyncWrite + Unpin + Send> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Mirror a record. Failures are logged and otherwise ignored; the
    /// console is not part of the durability contract.
    pub async fn mirror(&mut self, record: &LogRecord) -> bool {
        if let Err(e) = write_line(&mut self.out, &record.to_line()).await {
            tracing::warn!(error = %e, "console echo failed");
            return false;
        }
        true
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &[u8]) -> std::io::Result<()> {
    out.write_all(line).await?;
    out.flush().await
}
