//! Durable Sink: append-only record store with per-record sync.
//!
//! The file is opened exactly once. Truncation only ever happens at open time
//! (`append = false`); afterwards the file only grows. Parent directories are
//! not created, so a missing directory is an open error like any other.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use logsink_core::error::{LogSinkError, Result};
use logsink_core::LogRecord;

#[derive(Debug)]
pub struct DurableSink {
    file: File,
    path: PathBuf,
    written: u64,
}

impl DurableSink {
    pub async fn open(path: impl AsRef<Path>, append: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut opts = OpenOptions::new();
        opts.create(true);
        if append {
            opts.append(true);
        } else {
            opts.write(true).truncate(true);
        }

        let file = opts.open(&path).await.map_err(|source| LogSinkError::StoreOpen {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), append, "log store opened");
        Ok(Self {
            file,
            path,
            written: 0,
        })
    }

    /// Append one record and wait until it has reached stable storage.
    pub async fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = record.to_line();
        self.file.write_all(&line).await.map_err(LogSinkError::Persist)?;
        self.file.flush().await.map_err(LogSinkError::Persist)?;
        self.file.sync_data().await.map_err(LogSinkError::Persist)?;
        self.written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written since open.
    pub fn records_written(&self) -> u64 {
        self.written
    }
}
