//! Shared test doubles and builders for integration tests

use std::sync::Mutex;

use async_trait::async_trait;

use sitewatch::Monitor;
use sitewatch::notify::{Notifier, NotifyError, NotifyResult};
use sitewatch::source::{MonitorSource, SourceError, SourceResult};

pub fn test_monitor(id: i64, user_id: i64, url: &str) -> Monitor {
    Monitor {
        id,
        user_id,
        url: url.to_string(),
        check_interval: 300,
        is_active: true,
    }
}

pub fn inactive_monitor(id: i64, user_id: i64, url: &str) -> Monitor {
    Monitor {
        is_active: false,
        ..test_monitor(id, user_id, url)
    }
}

/// Notifier double that records every delivery attempt and can simulate a
/// user who blocked the bot.
pub struct RecordingNotifier {
    attempts: Mutex<Vec<(i64, String)>>,
    reject_user: Option<i64>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            reject_user: None,
        }
    }

    pub fn rejecting(user_id: i64) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            reject_user: Some(user_id),
        }
    }

    /// Every attempted delivery, in dispatch order (including rejected ones).
    pub fn attempts(&self) -> Vec<(i64, String)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, user_id: i64, text: &str) -> NotifyResult {
        self.attempts
            .lock()
            .unwrap()
            .push((user_id, text.to_string()));

        if self.reject_user == Some(user_id) {
            return Err(NotifyError::Rejected {
                status: 403,
                description: "Forbidden: bot was blocked by the user".to_string(),
            });
        }

        Ok(())
    }
}

/// Monitor source double whose backing store is unreachable.
pub struct FailingSource;

#[async_trait]
impl MonitorSource for FailingSource {
    async fn list_active_monitors(&self) -> SourceResult<Vec<Monitor>> {
        Err(SourceError::Unavailable(
            "database connection refused".to_string(),
        ))
    }
}
