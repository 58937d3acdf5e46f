//! In-band control directives.
//!
//! Matching rules:
//! - ASCII case-insensitive, substring (a sentinel anywhere in the message counts).
//! - Priority is the order of `SENTINELS`: terminate, then echo-enable, then echo-disable.
//! - Non-UTF-8 bytes are fine; matching never decodes the message.

/// Sending a message containing this token shuts the server down.
pub const TERMINATE_TOKEN: &str = "@EXIT@";
/// Terminate token understood by older senders.
pub const LEGACY_TERMINATE_TOKEN: &str = "%EXIT%";
/// Turns console echo on.
pub const ECHO_ENABLE_TOKEN: &str = "@ECHO=true@";
/// Turns console echo off.
pub const ECHO_DISABLE_TOKEN: &str = "@ECHO=false@";

/// Sentinels in priority order. First match wins.
const SENTINELS: [(&str, Directive); 4] = [
    (TERMINATE_TOKEN, Directive::Terminate),
    (LEGACY_TERMINATE_TOKEN, Directive::Terminate),
    (ECHO_ENABLE_TOKEN, Directive::EchoEnable),
    (ECHO_DISABLE_TOKEN, Directive::EchoDisable),
];

/// Classified intent of a received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Plain payload.
    None,
    /// Stop the receive loop. The message itself is not logged.
    Terminate,
    /// Mirror records to the console from now on.
    EchoEnable,
    /// Stop mirroring records to the console.
    EchoDisable,
}

impl Directive {
    /// Stable name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Directive::None => "none",
            Directive::Terminate => "terminate",
            Directive::EchoEnable => "echo_enable",
            Directive::EchoDisable => "echo_disable",
        }
    }

    /// Whether the message carrying this directive is written to the store.
    pub fn is_logged(self) -> bool {
        !matches!(self, Directive::Terminate)
    }
}

/// Classify a raw message.
pub fn classify(msg: &[u8]) -> Directive {
    SENTINELS
        .iter()
        .find(|(token, _)| contains_ignore_ascii_case(msg, token.as_bytes()))
        .map(|(_, d)| *d)
        .unwrap_or(Directive::None)
}

fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}
