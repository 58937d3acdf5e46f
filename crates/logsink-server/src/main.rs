//! logsink-server
//!
//! Receives messages on one ingress endpoint, appends each to the log file with
//! a timestamp, and reacts to in-band directives (@EXIT@, @ECHO=true@,
//! @ECHO=false@). Diagnostics go to stderr; stdout carries only the echo.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use logsink_core::error::{Result, EXIT_OK};
use logsink_server::cli::Cli;
use logsink_server::server::Server;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(cli).await {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            tracing::error!(class = e.class().as_str(), error = %e, "logsink-server failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = cli.into_config()?;
    let server = Server::bind(&cfg).await?;
    let summary = server.run().await?;
    tracing::debug!(reason = ?summary.reason, "stopped");
    Ok(())
}
