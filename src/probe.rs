//! HTTP(S) probing of monitored URLs
//!
//! A [`Probe`] performs a single GET request per check and reports the outcome
//! as data — a check never fails with an error, it *returns* the failure.
//!
//! ## Key behavior
//!
//! 1. **One pooled client** - connections are reused across concurrent checks
//! 2. **Latency tracking** - elapsed time is recorded even when the request fails
//! 3. **TLS expiry inspection** - the peer certificate's `notAfter` is read for
//!    https targets, with chain and hostname verification disabled so expired
//!    or self-signed certificates can still be inspected
//!
//! No retries happen inside a single check; the caller decides when to probe
//! again.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{instrument, trace};
use x509_parser::parse_x509_certificate;

/// Status codes counted as "site responding". Anything at or above 500, or a
/// transport failure, marks the site as down.
const ACCEPTED_STATUS: std::ops::Range<u16> = 200..500;

/// Outcome of a single probe, owned by the cycle that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// The probed target.
    pub url: String,
    /// Wall-clock duration of the attempt in milliseconds.
    pub response_time_ms: u64,
    pub outcome: ProbeOutcome,
}

/// What happened on the wire. A response and a transport failure are mutually
/// exclusive by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// A response was received (its status code may still mean "down").
    Responded {
        status: u16,
        /// Peer certificate `notAfter`, present only for https targets whose
        /// handshake completed and whose certificate parsed.
        ssl_expires_at: Option<DateTime<Utc>>,
        /// Whole days until expiry, truncated toward zero. Negative once the
        /// certificate has expired.
        ssl_days_left: Option<i64>,
    },
    /// The request never produced a response (timeout, DNS, refused
    /// connection, TLS handshake failure).
    Failed { error: String },
}

impl ProbeResult {
    /// Build a failed result for an attempt that never reached the network
    /// layer, e.g. a panicked check invocation.
    pub fn failed(url: impl ToString, error: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            response_time_ms: 0,
            outcome: ProbeOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    /// True iff a response was received with a status short of server error.
    pub fn is_up(&self) -> bool {
        matches!(
            self.outcome,
            ProbeOutcome::Responded { status, .. } if ACCEPTED_STATUS.contains(&status)
        )
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Responded { status, .. } => Some(status),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Failed { error } => Some(error),
            ProbeOutcome::Responded { .. } => None,
        }
    }

    pub fn ssl_days_left(&self) -> Option<i64> {
        match self.outcome {
            ProbeOutcome::Responded { ssl_days_left, .. } => ssl_days_left,
            ProbeOutcome::Failed { .. } => None,
        }
    }
}

/// Performs availability and certificate-expiry checks against single URLs.
///
/// Cloning is cheap and shares the underlying connection pool, so one probe
/// can serve many concurrent checks. Dropping the last clone releases the
/// pool.
#[derive(Debug, Clone)]
pub struct Probe {
    client: reqwest::Client,
}

impl Probe {
    /// Build a probe whose requests are bounded by `timeout` in total
    /// (connection, TLS handshake and response combined).
    ///
    /// Certificate verification is intentionally disabled: the point is to
    /// read expiry data off whatever certificate the peer presents, including
    /// expired and self-signed ones.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .tls_info(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Check a single URL, capturing every failure mode as data.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn check(&self, url: &str) -> ProbeResult {
        trace!("probing target");

        let start = Instant::now();
        let outcome = match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();

                let (ssl_expires_at, ssl_days_left) = if url.starts_with("https://") {
                    match peer_certificate_expiry(&response) {
                        Some((expires_at, days_left)) => (Some(expires_at), Some(days_left)),
                        None => (None, None),
                    }
                } else {
                    (None, None)
                };

                ProbeOutcome::Responded {
                    status,
                    ssl_expires_at,
                    ssl_days_left,
                }
            }
            Err(e) => ProbeOutcome::Failed {
                error: describe_transport_error(&e),
            },
        };
        let response_time_ms = start.elapsed().as_millis() as u64;

        ProbeResult {
            url: url.to_string(),
            response_time_ms,
            outcome,
        }
    }
}

/// Read the negotiated peer certificate off a response and compute its expiry.
///
/// Returns `None` when the connection carried no TLS info (plain http, or a
/// handshake that never completed) or the certificate failed to parse.
fn peer_certificate_expiry(response: &reqwest::Response) -> Option<(DateTime<Utc>, i64)> {
    let tls_info = response.extensions().get::<reqwest::tls::TlsInfo>()?;
    let der = tls_info.peer_certificate()?;

    let (_, certificate) = parse_x509_certificate(der).ok()?;
    let expires_at = DateTime::from_timestamp(certificate.validity().not_after.timestamp(), 0)?;
    let days_left = (expires_at - Utc::now()).num_days();

    Some((expires_at, days_left))
}

/// Map a transport failure to the message surfaced in alerts.
///
/// Timeouts get a fixed message; everything else surfaces the innermost error
/// in the chain, which carries the useful part ("connection refused", the DNS
/// failure) instead of reqwest's outer wrapping.
fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return String::from("Connection timed out");
    }

    let mut cause: &dyn std::error::Error = error;
    while let Some(inner) = cause.source() {
        cause = inner;
    }
    cause.to_string()
}
