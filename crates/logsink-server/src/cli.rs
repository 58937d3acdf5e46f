//! Command-line surface for the server binary.
//!
//! Flags override values from the config file. `--help` exits 0 and usage
//! errors exit 2 (both handled by clap); everything else that goes wrong
//! before the loop starts exits 1.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::Parser;

use logsink_core::error::Result;

use crate::config::{self, ServerConfig};

/// Config file read when `--config` is not given. Optional.
pub const DEFAULT_CONFIG_PATH: &str = "logsink.yaml";

/// Message ingestion sink.
///
/// Received messages get the current time prepended and are appended to the
/// log file; they are not otherwise parsed or modified. Send a message
/// containing @EXIT@ to stop the server, @ECHO=true@ / @ECHO=false@ to toggle
/// console echo.
#[derive(Parser, Debug)]
#[command(name = "logsink-server", version)]
pub struct Cli {
    /// YAML config file (default: ./logsink.yaml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file for received messages (default: ./log.log)
    #[arg(long = "log", value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Port to receive on, keeping the configured scheme and host (default: 5555)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Full ingress endpoint, e.g. tcp://*:5555 or udp://127.0.0.1:5555
    #[arg(long, value_name = "URL")]
    pub bind: Option<String>,

    /// Append to an existing log file instead of truncating it (default: true)
    #[arg(long = "log-append", alias = "log_append", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub log_append: Option<bool>,

    /// Echo received messages to stdout (default: false)
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub echo: Option<bool>,
}

impl Cli {
    /// Load the config file and apply flag overrides.
    pub fn into_config(self) -> Result<ServerConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => config::load_or_default(DEFAULT_CONFIG_PATH)?,
        };

        if let Some(bind) = self.bind {
            cfg.ingress.bind = bind;
        }
        if let Some(port) = self.port {
            cfg.ingress.bind = cfg.ingress.endpoint()?.with_port(port).to_string();
        }
        if let Some(path) = self.log {
            cfg.store.path = path;
        }
        if let Some(append) = self.log_append {
            cfg.store.append = append;
        }
        if let Some(echo) = self.echo {
            cfg.echo.initial = echo;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
