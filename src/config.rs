use crate::types::UDP_PORT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Where a device lives and how long to wait for it
///
/// Deserializes from an integration layer's own config file; only `host` is
/// required:
///
/// ```
/// use tfiac::TfiacConfig;
///
/// let config = TfiacConfig::new("192.168.1.40");
/// assert_eq!(config.port, 7777);
/// assert_eq!(config.timeout().as_secs(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfiacConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Reply timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_port() -> u16 {
    UDP_PORT
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl TfiacConfig {
    /// Config for a device on the default port with the default 5 second timeout
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// How long a single exchange waits for the reply datagram
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
