//! Error handling for the portpulse prober
//!
//! Only configuration and setup problems are errors: a port that fails
//! its probe is reported through [`crate::probe::CheckOutcome`] and
//! never aborts the scan.

use thiserror::Error;

/// Main error type for probe setup and configuration
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Host resolution failed: {0}")]
    Resolution(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Port range error: {0}")]
    PortRange(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

/// Result type alias for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Convert common errors to ProbeError
impl From<std::net::AddrParseError> for ProbeError {
    fn from(e: std::net::AddrParseError) -> Self {
        ProbeError::InvalidTarget(e.to_string())
    }
}

impl From<std::num::ParseIntError> for ProbeError {
    fn from(e: std::num::ParseIntError) -> Self {
        ProbeError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProbeError::Resolution("no such host".to_string());
        assert_eq!(err.to_string(), "Host resolution failed: no such host");

        let err = ProbeError::PortRange("start >= end".to_string());
        assert!(err.to_string().contains("Port range"));
    }

    #[test]
    fn test_from_addr_parse_error() {
        let parse_err = "not-an-ip".parse::<std::net::IpAddr>().unwrap_err();
        let err: ProbeError = parse_err.into();
        assert!(matches!(err, ProbeError::InvalidTarget(_)));
    }
}
