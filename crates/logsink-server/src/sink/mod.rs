//! Output side: the durable store and the console echo.

pub mod durable;
pub mod echo;

pub use durable::DurableSink;
pub use echo::{Console, EchoGate};
