//! TCP reachability check implementation

use super::{
    decode_reply, tcp_probe_payload, CheckOutcome, CheckResult, ProbeTarget, Protocol,
    MAX_REPLY_BYTES,
};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Checks a single TCP port by connecting and exchanging the probe message
#[derive(Debug, Clone)]
pub struct TcpPortChecker {
    timeout: Duration,
}

impl TcpPortChecker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Probe one port. Always returns exactly one result; the connection
    /// is closed on every exit path.
    pub async fn check(&self, target: &ProbeTarget) -> CheckResult {
        let start = Instant::now();
        let port = target.port;

        let mut stream = match timeout(self.timeout, TcpStream::connect(target.addr())).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return CheckResult::failure(
                    Protocol::Tcp,
                    port,
                    CheckOutcome::ConnectFailed,
                    Some(e.to_string()),
                    start.elapsed(),
                );
            }
            Err(_) => {
                // Connect-phase deadline counts as a connect failure;
                // Timeout is reserved for the reply wait.
                return CheckResult::failure(
                    Protocol::Tcp,
                    port,
                    CheckOutcome::ConnectFailed,
                    Some("connect timed out".to_string()),
                    start.elapsed(),
                );
            }
        };

        log::debug!("tcp connect {} established", target.addr());

        let payload = tcp_probe_payload(port);
        if let Err(e) = stream.write_all(&payload).await {
            return CheckResult::failure(
                Protocol::Tcp,
                port,
                CheckOutcome::SendFailed,
                Some(e.to_string()),
                start.elapsed(),
            );
        }

        let mut buf = [0u8; MAX_REPLY_BYTES];
        match timeout(self.timeout, stream.read(&mut buf)).await {
            Ok(Ok(0)) => CheckResult::failure(
                Protocol::Tcp,
                port,
                CheckOutcome::ReceiveFailed,
                Some("peer closed without replying".to_string()),
                start.elapsed(),
            ),
            Ok(Ok(n)) => {
                CheckResult::success(Protocol::Tcp, port, decode_reply(&buf, n), start.elapsed())
            }
            Ok(Err(e)) => CheckResult::failure(
                Protocol::Tcp,
                port,
                CheckOutcome::ReceiveFailed,
                Some(e.to_string()),
                start.elapsed(),
            ),
            Err(_) => CheckResult::failure(
                Protocol::Tcp,
                port,
                CheckOutcome::Timeout,
                None,
                start.elapsed(),
            ),
        }
    }
}
