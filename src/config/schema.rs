//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the mock server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MockConfig {
    /// Directory holding the `*.json` definition files.
    pub api_path: PathBuf,

    /// Print the startup banner.
    pub show_logo: bool,

    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Definition hot-reload settings.
    pub watcher: WatcherConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_path: PathBuf::from("./api"),
            show_logo: true,
            listener: ListenerConfig::default(),
            watcher: WatcherConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_address: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// The `host:port` string handed to the TCP listener.
    pub fn address(&self) -> String {
        if self.bind_address.contains(':') {
            format!("[{}]:{}", self.bind_address, self.port)
        } else {
            format!("{}:{}", self.bind_address, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 18080,
        }
    }
}

/// Hot-reload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Quiet period in milliseconds before a burst of changes is applied.
    pub debounce_ms: u64,
}

impl WatcherConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { debounce_ms: 1000 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl ObservabilityConfig {
    pub fn metrics_socket_addr(&self) -> Option<SocketAddr> {
        self.metrics_address.parse().ok()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
