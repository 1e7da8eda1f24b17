//! In-memory monitor source (no persistence)
//!
//! Holds the monitor set in process memory. Useful for:
//! - Config-seeded deployments without a database
//! - Testing the check cycle without external dependencies
//!
//! All data is lost on restart; a database-backed source should be used when
//! monitors are registered at runtime and must survive restarts.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Monitor;

use super::MonitorSource;
use super::error::SourceResult;

/// Monitor source backed by a shared in-memory list.
pub struct MemoryMonitorSource {
    monitors: RwLock<Vec<Monitor>>,
}

impl MemoryMonitorSource {
    pub fn new() -> Self {
        Self {
            monitors: RwLock::new(Vec::new()),
        }
    }

    pub fn with_monitors(monitors: Vec<Monitor>) -> Self {
        Self {
            monitors: RwLock::new(monitors),
        }
    }

    /// Register a monitor.
    pub async fn insert(&self, monitor: Monitor) {
        self.monitors.write().await.push(monitor);
    }

    /// Delete a monitor, checking that it belongs to the given user.
    ///
    /// Returns true if a monitor was removed.
    pub async fn remove(&self, monitor_id: i64, user_id: i64) -> bool {
        let mut monitors = self.monitors.write().await;
        let before = monitors.len();
        monitors.retain(|m| !(m.id == monitor_id && m.user_id == user_id));
        monitors.len() < before
    }

    /// All monitors registered by a user, ordered by id ascending.
    pub async fn monitors_for_user(&self, user_id: i64) -> Vec<Monitor> {
        let mut monitors: Vec<Monitor> = self
            .monitors
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        monitors.sort_by_key(|m| m.id);
        monitors
    }
}

impl Default for MemoryMonitorSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitorSource for MemoryMonitorSource {
    async fn list_active_monitors(&self) -> SourceResult<Vec<Monitor>> {
        let mut monitors: Vec<Monitor> = self
            .monitors
            .read()
            .await
            .iter()
            .filter(|m| m.is_active)
            .cloned()
            .collect();
        monitors.sort_by_key(|m| m.id);

        Ok(monitors)
    }
}
