//! Portpulse - a TCP/UDP port reachability prober.
//!
//! Probes every port in a configured range with a short text handshake
//! answered by a cooperating echo endpoint, and reports one result per
//! port per protocol.

pub mod config;
pub mod error;
pub mod output;
pub mod probe;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use config::ProbeConfig;
pub use error::{ProbeError, ProbeResult};
pub use probe::{CheckOutcome, CheckResult, ProbeTarget, Protocol};
pub use scanner::engine::ScanEngine;
pub use scanner::{ScanReport, ScanStats};

pub type Result<T> = std::result::Result<T, ProbeError>;
