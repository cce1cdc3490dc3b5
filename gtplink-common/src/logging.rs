//! Logging infrastructure for gtplink
//!
//! Subscriber setup over the `tracing` crate, driven by the level a node
//! is configured with, plus GTP traffic logging helpers and hex
//! formatting for debugging.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Subscriber verbosity, as carried in a node's configuration.
///
/// Deserializes from the lowercase level names used in YAML
/// (`log_level: debug`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-datagram hex dumps
    Trace,
    /// Protocol events: sends, retransmissions, reply matching
    Debug,
    /// Lifecycle events (default)
    #[default]
    Info,
    /// Timeouts and dropped datagrams
    Warn,
    /// Local failures only
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installs the global tracing subscriber at the given level.
///
/// Call once at startup, normally with the `log_level` from the node's
/// configuration. The `RUST_LOG` environment variable, when set, takes
/// precedence and supports per-module directives
/// (`RUST_LOG=info,gtplink_node=debug`).
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Protocol direction for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Incoming/received message
    Rx,
    /// Outgoing/transmitted message
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Log a GTP message at debug level with a hex dump at trace level.
pub fn log_gtp_message(direction: Direction, msg_type: &str, data: &[u8]) {
    tracing::debug!(
        protocol = "GTP",
        direction = %direction,
        msg_type = msg_type,
        len = data.len(),
        "{} GTP message",
        direction
    );
    tracing::trace!(protocol = "GTP", hex = %HexDump(data), "GTP payload");
}

/// Wrapper for hex dump formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_filter_directives() {
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::Warn.as_str(), "warn");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_log_level_from_yaml() {
        assert_eq!(
            serde_yaml::from_str::<LogLevel>("debug").unwrap(),
            LogLevel::Debug
        );
        assert_eq!(
            serde_yaml::from_str::<LogLevel>("warn").unwrap(),
            LogLevel::Warn
        );
        assert!(serde_yaml::from_str::<LogLevel>("loud").is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Rx.to_string(), "RX");
        assert_eq!(Direction::Tx.to_string(), "TX");
    }

    #[test]
    fn test_hex_dump_wrapper() {
        let data = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(format!("{}", HexDump(&data)), "deadbeef");
    }
}
