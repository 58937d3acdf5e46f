//! logsink core: in-band directive protocol, log record format, and errors.
//!
//! This crate defines the wire contract shared by the server and any sender:
//! the reserved sentinel tokens, how a raw message is classified, and how a
//! record line is laid out in the backing store. It carries no transport or
//! runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Classification accepts arbitrary bytes; there is no malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{LogSinkError, Result};
pub use protocol::directive::{classify, Directive};
pub use protocol::record::LogRecord;
