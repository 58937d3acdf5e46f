use std::path::PathBuf;

use logsink_core::error::{LogSinkError, Result};
use serde::Deserialize;

use crate::transport::Endpoint;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub ingress: IngressSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub echo: EchoSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ingress: IngressSection::default(),
            store: StoreSection::default(),
            echo: EchoSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LogSinkError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.ingress.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngressSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for IngressSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

impl IngressSection {
    pub fn validate(&self) -> Result<()> {
        self.endpoint()?;
        if !(1..=MAX_MESSAGE_BYTES_LIMIT).contains(&self.max_message_bytes) {
            return Err(LogSinkError::Config(format!(
                "ingress.max_message_bytes must be between 1 and {MAX_MESSAGE_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Parsed form of `bind`.
    pub fn endpoint(&self) -> Result<Endpoint> {
        self.bind.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Keep existing content (true) or truncate on open (false).
    #[serde(default = "default_append")]
    pub append: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            append: default_append(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(LogSinkError::Config("store.path must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EchoSection {
    /// Echo state before any directive arrives.
    #[serde(default)]
    pub initial: bool,
}

/// Default port, shared by convention with senders.
pub const DEFAULT_PORT: u16 = 5555;

const MAX_MESSAGE_BYTES_LIMIT: usize = 16 * 1024 * 1024;

fn default_bind() -> String {
    format!("tcp://*:{DEFAULT_PORT}")
}
fn default_max_message_bytes() -> usize {
    64 * 1024
}
fn default_store_path() -> PathBuf {
    PathBuf::from("./log.log")
}
fn default_append() -> bool {
    true
}
