//! Backing store record format.
//!
//! One record per line: `<timestamp> <content>\n`. The content is written
//! verbatim (no escaping), so a message containing a newline spans lines.

use bytes::Bytes;
use chrono::{DateTime, Local};

/// `strftime` layout of the record timestamp, e.g. `2024-03-01 14:05:09.000123`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Byte length of a formatted timestamp.
pub const TIMESTAMP_LEN: usize = 26;

/// A payload message stamped with its generation time.
#[derive(Debug, Clone)]
pub struct LogRecord {
    timestamp: DateTime<Local>,
    content: Bytes,
}

impl LogRecord {
    /// Stamp `content` with the current local time.
    pub fn new(content: Bytes) -> Self {
        Self::with_timestamp(Local::now(), content)
    }

    pub fn with_timestamp(timestamp: DateTime<Local>, content: Bytes) -> Self {
        Self { timestamp, content }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Render the full line, trailing newline included.
    pub fn to_line(&self) -> Vec<u8> {
        let ts = self.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let mut line = Vec::with_capacity(ts.len() + 1 + self.content.len() + 1);
        line.extend_from_slice(ts.as_bytes());
        line.push(b' ');
        line.extend_from_slice(&self.content);
        line.push(b'\n');
        line
    }
}
