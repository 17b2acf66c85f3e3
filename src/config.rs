//! Configuration module for the portpulse prober

use crate::utils::scan_options::ScanOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for a reachability scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Target host to probe (IPv4 literal or resolvable name)
    pub host: String,

    /// First port of the range
    pub port: u16,

    /// End of the range, exclusive
    pub max_port: u16,

    /// Timeout for each connect/send/receive wait in milliseconds
    pub timeout: u64,

    /// Maximum number of ports probed concurrently
    pub concurrency: usize,

    /// Order in which ports are probed
    pub scan_order: ScanOrder,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6030,
            max_port: 6060,
            timeout: 1000, // One second covers LAN round trips comfortably
            concurrency: 64,
            scan_order: ScanOrder::Serial,
        }
    }
}

impl ProbeConfig {
    /// Create a new configuration for the given host
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Set the port range `[port, max_port)`
    pub fn with_port_range(mut self, port: u16, max_port: u16) -> Self {
        self.port = port;
        self.max_port = max_port;
        self
    }

    /// Set the per-operation timeout in milliseconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the port ordering
    pub fn with_scan_order(mut self, order: ScanOrder) -> Self {
        self.scan_order = order;
        self
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Ports covered by this configuration, in range order
    pub fn port_range(&self) -> Vec<u16> {
        (self.port..self.max_port).collect()
    }

    /// Load configuration from TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| crate::ProbeError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ProbeConfig = toml::from_str(&content)
            .map_err(|e| crate::ProbeError::Config(format!("Failed to parse TOML: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from the default location, if present
    pub fn load_default_config() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));

        let pulse_config = home_dir.join(".portpulse.toml");

        if pulse_config.exists() {
            if let Ok(config) = Self::from_toml_file(&pulse_config) {
                log::info!("Loaded config from {}", pulse_config.display());
                return config;
            }
        }

        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(crate::ProbeError::InvalidTarget(
                "Target host cannot be empty".to_string(),
            ));
        }

        if self.port >= self.max_port {
            return Err(crate::ProbeError::PortRange(format!(
                "Start port {} must be below max port {}",
                self.port, self.max_port
            )));
        }

        if self.timeout == 0 {
            return Err(crate::ProbeError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.concurrency == 0 {
            return Err(crate::ProbeError::Config(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
