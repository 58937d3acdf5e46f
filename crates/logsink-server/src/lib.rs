//! logsink server library entry.
//!
//! This crate wires the transport adapters, the durable sink, the echo gate,
//! and the lifecycle loop into a runnable server. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod obs;
pub mod server;
pub mod sink;
pub mod transport;
