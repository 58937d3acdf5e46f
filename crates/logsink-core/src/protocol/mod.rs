//! Protocol modules (directives + record format).
//!
//! Control and payload share one undifferentiated message stream:
//! - `directive`: sentinel tokens and the classify-then-dispatch enum.
//! - `record`: the timestamped line written to the backing store.

pub mod directive;
pub mod record;
