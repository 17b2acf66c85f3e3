//! Output formatting and management

use crate::scanner::ScanReport;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<String>,
    pub colored: bool,
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            file: None,
            colored: true,
            verbose: false,
        }
    }
}

/// Main output manager
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write a scan report to stdout or the configured file
    pub fn write_report(&self, report: &ScanReport) -> io::Result<()> {
        let output = match self.config.format {
            OutputFormat::Text => self.format_text(report),
            OutputFormat::Json => self.format_json(report)?,
        };

        match &self.config.file {
            Some(filename) => {
                let mut file = File::create(filename)?;
                file.write_all(output.as_bytes())?;
            }
            None => {
                print!("{}", output);
            }
        }

        Ok(())
    }

    /// Format a report as per-port status lines plus a summary
    fn format_text(&self, report: &ScanReport) -> String {
        let mut output = String::new();

        for result in &report.results {
            let status = if result.is_success() {
                "test ok.".to_string()
            } else {
                format!("test fail ({}).", result.outcome)
            };

            let mut line = format!("{} port:{} {}", result.protocol, result.port, status);

            if self.config.verbose {
                line.push_str(&format!(" [{}ms]", result.response_time.as_millis()));
                if let Some(message) = &result.message {
                    line.push_str(&format!(" {}", message));
                }
            }
            line.push('\n');

            output.push_str(&self.colorize(&line, result.is_success()));
        }

        output.push_str(&format!(
            "\n{} checks on {}: {} ok, {} failed in {:.2}s\n",
            report.stats.checks_run,
            report.host,
            report.stats.successes,
            report.stats.failures(),
            report.duration.as_secs_f64()
        ));

        output
    }

    /// Format a report as JSON
    fn format_json(&self, report: &ScanReport) -> io::Result<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    fn colorize(&self, text: &str, success: bool) -> String {
        if !self.config.colored {
            return text.to_string();
        }

        if success {
            text.green().to_string()
        } else {
            text.red().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{CheckOutcome, CheckResult, Protocol};
    use std::time::Duration;

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new("127.0.0.1".to_string());
        report.add_result(CheckResult::success(
            Protocol::Tcp,
            6030,
            "send port_6030".to_string(),
            Duration::from_millis(2),
        ));
        report.add_result(CheckResult::failure(
            Protocol::Udp,
            6031,
            CheckOutcome::Timeout,
            None,
            Duration::from_millis(500),
        ));
        report
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_lines() {
        let manager = OutputManager::new(OutputConfig {
            colored: false,
            ..Default::default()
        });
        let text = manager.format_text(&sample_report());

        assert!(text.contains("tcp port:6030 test ok."));
        assert!(text.contains("udp port:6031 test fail (timeout)."));
        assert!(text.contains("2 checks on 127.0.0.1: 1 ok, 1 failed"));
    }

    #[test]
    fn test_verbose_includes_reply() {
        let manager = OutputManager::new(OutputConfig {
            colored: false,
            verbose: true,
            ..Default::default()
        });
        let text = manager.format_text(&sample_report());

        assert!(text.contains("send port_6030"));
    }

    #[test]
    fn test_json_round_trips() {
        let manager = OutputManager::new(OutputConfig {
            format: OutputFormat::Json,
            colored: false,
            ..Default::default()
        });
        let json = manager.format_json(&sample_report()).unwrap();
        let parsed: ScanReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.stats.successes, 1);
    }
}
