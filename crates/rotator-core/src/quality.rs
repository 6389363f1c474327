//! Network quality estimation
//!
//! Converts one latency sample into a bounded score for the share report.
//! A single probe per invocation, no retries, no caching across cycles: the
//! score is a pure function of the probe outcome.
//!
//! The probe itself is a timed TCP connect to the API host. An ICMP echo
//! would need raw-socket privileges; the TCP handshake round-trip measures
//! the same path without them.

use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tracing::debug;

/// Score reported when the host is unreachable or the probe itself errors.
pub const FALLBACK_QUALITY: u8 = 50;

/// Upper bound on one probe attempt.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Map a round-trip time in milliseconds to a score in 1..=100.
pub fn score_from_rtt(rtt_ms: f64) -> u8 {
    (100.0 - rtt_ms).round().clamp(1.0, 100.0) as u8
}

/// One latency measurement toward a fixed target.
///
/// Returns `None` when the target cannot be reached, so the caller can
/// degrade to `FALLBACK_QUALITY` without treating it as an error.
#[allow(async_fn_in_trait)]
pub trait LatencyProbe {
    async fn rtt_ms(&self) -> Option<f64>;
}

/// Probe that times a TCP connect to `host:443`.
#[derive(Debug, Clone)]
pub struct TcpLatencyProbe {
    addr: String,
    timeout: Duration,
}

impl TcpLatencyProbe {
    /// Probe the given host on the HTTPS port.
    pub fn new(host: &str) -> Self {
        Self {
            addr: format!("{host}:443"),
            timeout: PROBE_TIMEOUT,
        }
    }

    /// Probe an explicit `host:port` address with a custom timeout.
    pub fn with_addr(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }
}

impl LatencyProbe for TcpLatencyProbe {
    async fn rtt_ms(&self) -> Option<f64> {
        let started = Instant::now();
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(_stream)) => {
                let rtt = started.elapsed().as_secs_f64() * 1000.0;
                debug!(addr = %self.addr, rtt_ms = rtt, "latency probe completed");
                Some(rtt)
            }
            Ok(Err(e)) => {
                debug!(addr = %self.addr, error = %e, "latency probe failed");
                None
            }
            Err(_) => {
                debug!(addr = %self.addr, timeout_secs = self.timeout.as_secs(), "latency probe timed out");
                None
            }
        }
    }
}

/// Estimate the quality score from a single probe.
///
/// Probe success maps through `score_from_rtt`; any failure degrades to
/// `FALLBACK_QUALITY` and is never surfaced as an error.
pub async fn estimate<P: LatencyProbe>(probe: &P) -> u8 {
    match probe.rtt_ms().await {
        Some(rtt) => score_from_rtt(rtt),
        None => FALLBACK_QUALITY,
    }
}
