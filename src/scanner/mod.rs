//! Scanner module containing the scan engine and result aggregation

pub mod engine;

use crate::probe::{CheckOutcome, CheckResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use engine::ScanEngine;

/// Aggregated results of one range scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Host as configured (pre-resolution)
    pub host: String,

    /// When the scan started
    pub started_at: DateTime<Utc>,

    /// One entry per port per protocol
    pub results: Vec<CheckResult>,

    /// Total scan duration
    pub duration: Duration,

    /// Outcome counters
    pub stats: ScanStats,
}

impl ScanReport {
    pub fn new(host: String) -> Self {
        Self {
            host,
            started_at: Utc::now(),
            results: Vec::new(),
            duration: Duration::from_secs(0),
            stats: ScanStats::default(),
        }
    }

    /// Add a check result to the report
    pub fn add_result(&mut self, result: CheckResult) {
        self.stats.record(&result);
        self.results.push(result);
    }

    /// Set the scan duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Number of checks that produced a result
    pub fn total_checks(&self) -> usize {
        self.results.len()
    }

    /// Ports with at least one successful check
    pub fn responsive_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self
            .results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.port)
            .collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    /// Sort results for consistent output
    pub fn sort_results(&mut self) {
        self.results
            .sort_by_key(|r| (r.port, r.protocol.as_str()));
    }
}

/// Outcome counters for one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub checks_run: u64,
    pub successes: u64,
    pub connect_failures: u64,
    pub send_failures: u64,
    pub receive_failures: u64,
    pub timeouts: u64,
}

impl ScanStats {
    /// Count one check result
    pub fn record(&mut self, result: &CheckResult) {
        self.checks_run += 1;
        match result.outcome {
            CheckOutcome::Success => self.successes += 1,
            CheckOutcome::ConnectFailed => self.connect_failures += 1,
            CheckOutcome::SendFailed => self.send_failures += 1,
            CheckOutcome::ReceiveFailed => self.receive_failures += 1,
            CheckOutcome::Timeout => self.timeouts += 1,
        }
    }

    pub fn failures(&self) -> u64 {
        self.checks_run - self.successes
    }
}

/// Thread-safe result collector shared by probe tasks
pub type ResultCollector = std::sync::Arc<tokio::sync::Mutex<ScanReport>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Protocol;

    fn ok(port: u16, protocol: Protocol) -> CheckResult {
        CheckResult::success(protocol, port, "reply".to_string(), Duration::from_millis(1))
    }

    #[test]
    fn test_stats_recording() {
        let mut report = ScanReport::new("127.0.0.1".to_string());
        report.add_result(ok(6030, Protocol::Tcp));
        report.add_result(CheckResult::failure(
            Protocol::Udp,
            6030,
            CheckOutcome::Timeout,
            None,
            Duration::from_millis(500),
        ));

        assert_eq!(report.stats.checks_run, 2);
        assert_eq!(report.stats.successes, 1);
        assert_eq!(report.stats.timeouts, 1);
        assert_eq!(report.stats.failures(), 1);
    }

    #[test]
    fn test_responsive_ports_dedup() {
        let mut report = ScanReport::new("127.0.0.1".to_string());
        report.add_result(ok(6031, Protocol::Tcp));
        report.add_result(ok(6031, Protocol::Udp));
        report.add_result(ok(6030, Protocol::Tcp));

        assert_eq!(report.responsive_ports(), vec![6030, 6031]);
    }

    #[test]
    fn test_sort_results() {
        let mut report = ScanReport::new("127.0.0.1".to_string());
        report.add_result(ok(6031, Protocol::Udp));
        report.add_result(ok(6030, Protocol::Udp));
        report.add_result(ok(6030, Protocol::Tcp));
        report.sort_results();

        let order: Vec<(u16, Protocol)> =
            report.results.iter().map(|r| (r.port, r.protocol)).collect();
        assert_eq!(
            order,
            vec![
                (6030, Protocol::Tcp),
                (6030, Protocol::Udp),
                (6031, Protocol::Udp)
            ]
        );
    }
}
