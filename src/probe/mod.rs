//! Probe primitives shared by the TCP and UDP checkers

pub mod tcp;
pub mod udp;

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub use tcp::TcpPortChecker;
pub use udp::UdpPortChecker;

/// Largest reply accepted from the echo endpoint; longer replies are truncated
pub const MAX_REPLY_BYTES: usize = 200;

/// Protocol enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal outcome of a single port/protocol check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// A reply arrived within the bound
    Success,
    /// TCP connect was refused, unreachable, or exceeded the bound
    ConnectFailed,
    /// The probe payload could not be sent
    SendFailed,
    /// Socket-level receive error, or the peer closed without replying
    ReceiveFailed,
    /// No reply within the configured bound
    Timeout,
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::Success => write!(f, "ok"),
            CheckOutcome::ConnectFailed => write!(f, "connect failed"),
            CheckOutcome::SendFailed => write!(f, "send failed"),
            CheckOutcome::ReceiveFailed => write!(f, "receive failed"),
            CheckOutcome::Timeout => write!(f, "timeout"),
        }
    }
}

/// A single host/port pair to probe, resolved and owned by one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTarget {
    pub ip: IpAddr,
    pub port: u16,
}

impl ProbeTarget {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

/// Result of a single port/protocol check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub protocol: Protocol,
    pub port: u16,
    pub outcome: CheckOutcome,
    /// Echoed reply text on success, error detail on failure
    pub message: Option<String>,
    pub response_time: Duration,
}

impl CheckResult {
    pub fn success(protocol: Protocol, port: u16, reply: String, response_time: Duration) -> Self {
        Self {
            protocol,
            port,
            outcome: CheckOutcome::Success,
            message: Some(reply),
            response_time,
        }
    }

    pub fn failure(
        protocol: Protocol,
        port: u16,
        outcome: CheckOutcome,
        detail: Option<String>,
        response_time: Duration,
    ) -> Self {
        Self {
            protocol,
            port,
            outcome,
            message: detail,
            response_time,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == CheckOutcome::Success
    }
}

/// Probe payload sent over TCP: `send port_<N>`
pub fn tcp_probe_payload(port: u16) -> Vec<u8> {
    format!("send port_{}", port).into_bytes()
}

/// Probe payload sent over UDP: `send msg port_<N> by udp`
pub fn udp_probe_payload(port: u16) -> Vec<u8> {
    format!("send msg port_{} by udp", port).into_bytes()
}

/// Decode a reply, never indexing past the kernel-reported length
pub(crate) fn decode_reply(buf: &[u8], len: usize) -> String {
    let bounded = len.min(buf.len());
    String::from_utf8_lossy(&buf[..bounded]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_format() {
        assert_eq!(tcp_probe_payload(6030), b"send port_6030".to_vec());
        assert_eq!(
            udp_probe_payload(6031),
            b"send msg port_6031 by udp".to_vec()
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(CheckOutcome::Success.to_string(), "ok");
        assert_eq!(CheckOutcome::Timeout.to_string(), "timeout");
        assert_eq!(CheckOutcome::ConnectFailed.to_string(), "connect failed");
    }

    #[test]
    fn test_decode_reply_bounds_length() {
        let buf = [b'a'; 16];
        // A length beyond the buffer must not read past it
        assert_eq!(decode_reply(&buf, 100), "a".repeat(16));
        assert_eq!(decode_reply(&buf, 4), "aaaa");
    }

    #[test]
    fn test_target_addr() {
        let target = ProbeTarget::new("127.0.0.1".parse().unwrap(), 6030);
        assert_eq!(target.addr().to_string(), "127.0.0.1:6030");
    }
}
