//! Scan engine driving independent per-port probe tasks

use crate::config::ProbeConfig;
use crate::probe::{CheckResult, ProbeTarget, TcpPortChecker, UdpPortChecker};
use crate::scanner::{ResultCollector, ScanReport};
use crate::utils::scan_options::order_ports;
use crate::utils::resolve_host;
use futures::future::join_all;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Semaphore};
use tokio_util::sync::CancellationToken;

/// Runs the configured port range through both checkers
pub struct ScanEngine {
    config: ProbeConfig,
    target_ip: IpAddr,
    tcp_checker: TcpPortChecker,
    udp_checker: UdpPortChecker,
    cancel: CancellationToken,
}

impl ScanEngine {
    /// Create a new scan engine with the given configuration.
    ///
    /// The host is resolved once here; an unresolvable host is a fatal
    /// configuration error, not a per-port outcome.
    pub async fn new(config: ProbeConfig) -> crate::Result<Self> {
        config.validate()?;

        let target_ip = resolve_host(&config.host).await?;
        let timeout = config.timeout_duration();

        Ok(Self {
            target_ip,
            tcp_checker: TcpPortChecker::new(timeout),
            udp_checker: UdpPortChecker::new(timeout),
            cancel: CancellationToken::new(),
            config,
        })
    }

    /// Token that aborts the scan when cancelled; pending ports are
    /// skipped, collected results are kept.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Address the scan will probe
    pub fn target_ip(&self) -> IpAddr {
        self.target_ip
    }

    /// Run the scan: one task per port, each producing a TCP and a UDP
    /// result. Individual failures never abort the scan.
    pub async fn scan(&self) -> crate::Result<ScanReport> {
        let start = Instant::now();
        let ports = order_ports(self.config.port_range(), self.config.scan_order);

        log::info!(
            "Probing {} ports on {} ({})",
            ports.len(),
            self.config.host,
            self.target_ip
        );

        let collector: ResultCollector =
            Arc::new(Mutex::new(ScanReport::new(self.config.host.clone())));
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));

        let mut handles = Vec::with_capacity(ports.len());
        for port in ports {
            let semaphore = Arc::clone(&semaphore);
            let collector = Arc::clone(&collector);
            let cancel = self.cancel.clone();
            let tcp_checker = self.tcp_checker.clone();
            let udp_checker = self.udp_checker.clone();
            let target = ProbeTarget::new(self.target_ip, port);

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                if cancel.is_cancelled() {
                    return;
                }

                tokio::select! {
                    _ = cancel.cancelled() => {
                        log::warn!("Probe of port {} aborted", target.port);
                    }
                    results = Self::check_port(tcp_checker, udp_checker, target) => {
                        let mut report = collector.lock().await;
                        for result in results {
                            report.add_result(result);
                        }
                    }
                }
            }));
        }

        join_all(handles).await;

        let mut report = match Arc::try_unwrap(collector) {
            Ok(mutex) => mutex.into_inner(),
            Err(arc) => arc.lock().await.clone(),
        };
        report.sort_results();
        report.set_duration(start.elapsed());

        log::info!(
            "Scan finished: {} checks, {} ok, {} failed in {:?}",
            report.stats.checks_run,
            report.stats.successes,
            report.stats.failures(),
            report.duration
        );

        Ok(report)
    }

    /// TCP first, then UDP, mirroring what the echo endpoint expects.
    /// Outcomes are tracked independently per protocol.
    async fn check_port(
        tcp_checker: TcpPortChecker,
        udp_checker: UdpPortChecker,
        target: ProbeTarget,
    ) -> [CheckResult; 2] {
        let tcp_result = tcp_checker.check(&target).await;
        log::debug!("tcp port:{} {}", target.port, tcp_result.outcome);

        let udp_result = udp_checker.check(&target).await;
        log::debug!("udp port:{} {}", target.port, udp_result.outcome);

        [tcp_result, udp_result]
    }
}
