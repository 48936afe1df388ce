//! Fixed-interval availability polling.
//!
//! The poller attempts a TCP connection, and on failure reports the
//! database as unavailable and sleeps for [`POLL_INTERVAL`] before trying
//! again. An attempt that has not finished within [`POLL_INTERVAL`] counts
//! as a timed-out failure; it has already used up the interval, so the next
//! attempt starts right away. There is no backoff, jitter or retry limit:
//! every error kind is treated as transient and an endpoint that never comes
//! up blocks forever.

use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::endpoint::Endpoint;

/// Delay between consecutive connect attempts.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Status line written after each failed attempt.
pub const UNAVAILABLE_MESSAGE: &str = "Database is unavailable - sleeping";

/// Status line written once the endpoint accepts a connection.
pub const AVAILABLE_MESSAGE: &str = "Database is up - executing command";

/// A single connectivity check against an endpoint.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint) -> io::Result<()>;
}

/// Opens and immediately closes a TCP connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, endpoint: &Endpoint) -> io::Result<()> {
        let stream = TcpStream::connect((endpoint.host(), endpoint.port())).await?;
        drop(stream);
        Ok(())
    }
}

/// Outcome of a completed poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    /// Connect attempts made, including the successful one.
    pub attempts: u64,
}

/// Blocks until an endpoint accepts connections.
pub struct Poller<P = TcpProbe> {
    endpoint: Endpoint,
    probe: P,
}

impl Poller<TcpProbe> {
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_probe(endpoint, TcpProbe)
    }
}

impl<P: Probe> Poller<P> {
    pub fn with_probe(endpoint: Endpoint, probe: P) -> Self {
        Self { endpoint, probe }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Poll until the endpoint is reachable, writing status lines to `out`.
    ///
    /// Never fails. A broken `out` is logged and polling carries on.
    pub async fn wait<W: Write>(&self, out: &mut W) -> Readiness {
        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            let result = match timeout(POLL_INTERVAL, self.probe.probe(&self.endpoint)).await {
                Ok(result) => result.map_err(Failure::Error),
                Err(_) => Err(Failure::TimedOut),
            };
            match result {
                Ok(()) => {
                    info!(
                        attempt = attempts,
                        endpoint = %self.endpoint,
                        "database accepted connection"
                    );
                    status_line(out, AVAILABLE_MESSAGE);
                    return Readiness { attempts };
                }
                Err(Failure::TimedOut) => {
                    debug!(
                        attempt = attempts,
                        endpoint = %self.endpoint,
                        limit = ?POLL_INTERVAL,
                        "connection attempt timed out"
                    );
                    status_line(out, UNAVAILABLE_MESSAGE);
                }
                Err(Failure::Error(e)) => {
                    debug!(
                        attempt = attempts,
                        endpoint = %self.endpoint,
                        kind = ?e.kind(),
                        error = %e,
                        "connection attempt failed"
                    );
                    status_line(out, UNAVAILABLE_MESSAGE);
                    sleep(POLL_INTERVAL).await;
                }
            }
        }
    }
}

enum Failure {
    TimedOut,
    Error(io::Error),
}

fn status_line<W: Write>(out: &mut W, message: &str) {
    if let Err(e) = writeln!(out, "{message}").and_then(|()| out.flush()) {
        warn!(error = %e, "failed to write status line");
    }
}
