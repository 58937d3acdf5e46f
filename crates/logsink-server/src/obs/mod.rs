//! In-process counters for the receive loop.
//!
//! The loop is single-threaded, so counters are plain integers owned by the
//! controller and reported once at shutdown.

pub mod stats;

pub use stats::SinkStats;
