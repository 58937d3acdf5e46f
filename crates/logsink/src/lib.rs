//! Top-level facade crate for logsink.
//!
//! Re-exports the protocol core and the server library so users can depend on a single crate.

pub mod core {
    pub use logsink_core::*;
}

pub mod server {
    pub use logsink_server::*;
}
