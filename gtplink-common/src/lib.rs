//! Shared infrastructure for the gtplink workspace.
//!
//! Provides the octet-level I/O primitives used by the GTP codecs, the
//! `tracing`-based logging setup, YAML-backed configuration types and the
//! library-level error type.

pub mod config;
pub mod error;
pub mod logging;
pub mod octets;

pub use config::NodeConfig;
pub use error::Error;
pub use logging::{init_logging, LogLevel};
pub use octets::{OctetView, OctetWriter, TruncatedError};
