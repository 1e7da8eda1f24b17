pub mod alerts;
pub mod config;
pub mod cycle;
pub mod notify;
pub mod probe;
pub mod source;
pub mod telegram;
pub mod util;

use serde::{Deserialize, Serialize};

/// A user-registered URL scheduled for periodic checking.
///
/// The check cycle holds a read-only snapshot of these records; registration
/// and persistence live behind [`source::MonitorSource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monitor {
    pub id: i64,
    /// Owner to notify when this monitor triggers an alert.
    pub user_id: i64,
    /// Absolute http/https URL with a dotted host, normalized at registration.
    pub url: String,
    /// Seconds between checks. Cadence is enforced by the trigger, not here.
    pub check_interval: u64,
    pub is_active: bool,
}
