//! Configuration structures for gtplink nodes
//!
//! A node binds one local UDP endpoint and services signalling requests
//! against remote peers. The configuration covers the socket, the receive
//! buffer, and the reliable-delivery defaults of TS 29.274 §7.6.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;

/// GTP-C default port (control plane signalling).
pub const GTP_C_PORT: u16 = 2123;

/// GTP-U default port (user plane tunnelling).
pub const GTP_U_PORT: u16 = 2152;

fn default_recv_buffer_size() -> usize {
    2048
}

fn default_timeout_ms() -> u64 {
    10
}

fn default_retries() -> u32 {
    5
}

fn default_channel_capacity() -> usize {
    256
}

/// Tunnel endpoint configuration.
///
/// All fields except the bind address have serde defaults, so a minimal
/// YAML document is just:
///
/// ```yaml
/// bind_addr: "127.0.0.1:2123"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Local UDP address the node listens on
    pub bind_addr: SocketAddr,
    /// Receive buffer size in bytes; datagrams larger than this fail to
    /// decode as truncated
    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,
    /// Default per-attempt timeout for messages expecting a reply
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
    /// Default retransmission budget for messages expecting a reply
    #[serde(default = "default_retries")]
    pub default_retries: u32,
    /// Capacity of the node's message channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Subscriber verbosity, passed to `logging::init_logging`
    #[serde(default)]
    pub log_level: LogLevel,
}

impl NodeConfig {
    /// Creates a configuration with default reliability parameters.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            recv_buffer_size: default_recv_buffer_size(),
            default_timeout_ms: default_timeout_ms(),
            default_retries: default_retries(),
            channel_capacity: default_channel_capacity(),
            log_level: LogLevel::default(),
        }
    }

    /// Loads a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: NodeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.recv_buffer_size < 12 {
            return Err(Error::Config(format!(
                "recv_buffer_size {} is smaller than a GTP header",
                self.recv_buffer_size
            )));
        }
        if self.channel_capacity == 0 {
            return Err(Error::Config("channel_capacity must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::new("127.0.0.1:2123".parse().unwrap());
        assert_eq!(config.recv_buffer_size, 2048);
        assert_eq!(config.default_timeout_ms, 10);
        assert_eq!(config.default_retries, 5);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_from_yaml_minimal() {
        let config = NodeConfig::from_yaml("bind_addr: \"10.0.0.1:2123\"").unwrap();
        assert_eq!(config.bind_addr, "10.0.0.1:2123".parse().unwrap());
        assert_eq!(config.default_retries, 5);
    }

    #[test]
    fn test_from_yaml_overrides() {
        let yaml = r"
bind_addr: '127.0.0.1:2152'
recv_buffer_size: 65535
default_timeout_ms: 250
default_retries: 3
log_level: debug
";
        let config = NodeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.recv_buffer_size, 65535);
        assert_eq!(config.default_timeout_ms, 250);
        assert_eq!(config.default_retries, 3);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_rejects_tiny_buffer() {
        let yaml = "bind_addr: '127.0.0.1:2123'\nrecv_buffer_size: 4\n";
        assert!(NodeConfig::from_yaml(yaml).is_err());
    }
}
