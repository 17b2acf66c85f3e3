//! UDP reachability check implementation

use super::{
    decode_reply, udp_probe_payload, CheckOutcome, CheckResult, ProbeTarget, Protocol,
    MAX_REPLY_BYTES,
};
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Checks a single UDP port with a one-datagram probe
#[derive(Debug, Clone)]
pub struct UdpPortChecker {
    timeout: Duration,
}

impl UdpPortChecker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Probe one port. UDP gives no synchronous signal for an absent
    /// listener, so the receive wait is bounded and silence reports
    /// `Timeout`. The socket is dropped on every exit path.
    pub async fn check(&self, target: &ProbeTarget) -> CheckResult {
        let start = Instant::now();
        let port = target.port;

        // Bind family must match the target or send_to fails outright
        let bind_addr = if target.ip.is_ipv6() {
            "[::]:0"
        } else {
            "0.0.0.0:0"
        };
        let socket = match UdpSocket::bind(bind_addr).await {
            Ok(socket) => socket,
            Err(e) => {
                return CheckResult::failure(
                    Protocol::Udp,
                    port,
                    CheckOutcome::SendFailed,
                    Some(e.to_string()),
                    start.elapsed(),
                );
            }
        };

        let payload = udp_probe_payload(port);
        if let Err(e) = socket.send_to(&payload, target.addr()).await {
            return CheckResult::failure(
                Protocol::Udp,
                port,
                CheckOutcome::SendFailed,
                Some(e.to_string()),
                start.elapsed(),
            );
        }

        log::debug!("udp probe sent to {}", target.addr());

        let mut buf = [0u8; MAX_REPLY_BYTES];
        match timeout(self.timeout, socket.recv_from(&mut buf)).await {
            // Any datagram back is an answer, even an empty one
            Ok(Ok((n, _))) => {
                CheckResult::success(Protocol::Udp, port, decode_reply(&buf, n), start.elapsed())
            }
            Ok(Err(e)) => CheckResult::failure(
                Protocol::Udp,
                port,
                CheckOutcome::ReceiveFailed,
                Some(e.to_string()),
                start.elapsed(),
            ),
            Err(_) => CheckResult::failure(
                Protocol::Udp,
                port,
                CheckOutcome::Timeout,
                None,
                start.elapsed(),
            ),
        }
    }
}
