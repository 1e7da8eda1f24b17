//! The check-and-alert cycle
//!
//! One [`CheckCycle::run`] call performs a complete pass over the active
//! monitors:
//!
//! ```text
//! load monitors → concurrent probes → settle-all join → policy → dispatch → summary
//! ```
//!
//! Failures are scoped as narrowly as possible: a single probe or a single
//! delivery failing never takes the cycle down, only a failure to load the
//! monitor set does — and that aborts just this cycle, the next one retries
//! independently.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::Monitor;
use crate::alerts;
use crate::notify::Notifier;
use crate::probe::{Probe, ProbeResult};
use crate::source::MonitorSource;

/// Counts of one completed cycle, for logging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Monitors that were loaded and probed this cycle.
    pub monitors_checked: usize,
    /// Alerts that were delivered (failed deliveries are logged, not counted).
    pub alerts_sent: usize,
    /// Probes that ended in a transport or invocation failure.
    pub probe_failures: usize,
}

/// Drives one check-and-alert pass per [`run`](CheckCycle::run) call.
///
/// The source and notifier are injected; the probe's pooled transport is
/// created fresh for each cycle and released when the cycle finishes, on
/// every exit path.
///
/// `run` is one-shot and holds no cross-cycle state; the trigger is
/// responsible for not overlapping invocations.
pub struct CheckCycle {
    source: Arc<dyn MonitorSource>,
    notifier: Arc<dyn Notifier>,
    probe_timeout: Duration,
}

impl CheckCycle {
    pub fn new(
        source: Arc<dyn MonitorSource>,
        notifier: Arc<dyn Notifier>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            probe_timeout,
        }
    }

    /// Execute one full cycle.
    ///
    /// Returns `Err` only when the monitor set could not be loaded; in that
    /// case nothing was probed and nothing was sent.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<CycleSummary> {
        debug!("starting check cycle");

        let monitors = self
            .source
            .list_active_monitors()
            .await
            .inspect_err(|e| error!("aborting cycle, failed to load monitors: {e}"))
            .context("failed to load active monitors")?;

        if monitors.is_empty() {
            let summary = CycleSummary::default();
            info!(monitors = 0, "cycle complete, nothing to check");
            return Ok(summary);
        }

        let probe = Probe::new(self.probe_timeout)?;
        let results = probe_all(&probe, &monitors).await;

        let mut summary = CycleSummary {
            monitors_checked: monitors.len(),
            ..CycleSummary::default()
        };

        for (monitor, result) in monitors.iter().zip(results) {
            if result.error().is_some() {
                summary.probe_failures += 1;
            }

            let Some(alert) = alerts::evaluate(&result) else {
                continue;
            };

            debug!("{}: alerting user {}", alert.url(), monitor.user_id);

            match self.notifier.send(monitor.user_id, &alert.to_message()).await {
                Ok(()) => summary.alerts_sent += 1,
                Err(e) => {
                    warn!(
                        "failed to deliver alert for {} to user {}: {e}",
                        monitor.url, monitor.user_id
                    );
                }
            }
        }

        info!(
            monitors = summary.monitors_checked,
            alerts = summary.alerts_sent,
            failures = summary.probe_failures,
            "cycle complete"
        );

        Ok(summary)
    }
}

/// Probe every monitor concurrently and settle all outcomes.
///
/// Results come back in monitor order regardless of completion order, so
/// alert dispatch is deterministic. A panicked or cancelled probe task is
/// converted into a failed result for that one monitor instead of poisoning
/// the join.
async fn probe_all(probe: &Probe, monitors: &[Monitor]) -> Vec<ProbeResult> {
    let handles: Vec<JoinHandle<ProbeResult>> = monitors
        .iter()
        .map(|monitor| {
            let probe = probe.clone();
            let url = monitor.url.clone();
            tokio::spawn(async move { probe.check(&url).await })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .zip(monitors)
        .map(|(joined, monitor)| {
            joined.unwrap_or_else(|e| {
                error!("{}: probe task failed: {e}", monitor.url);
                ProbeResult::failed(&monitor.url, format!("probe task failed: {e}"))
            })
        })
        .collect()
}
