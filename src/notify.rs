//! Outbound notification seam
//!
//! The check cycle only knows how to hand a message to a [`Notifier`]; the
//! actual channel (Telegram, a webhook, a test double) lives behind the trait.
//! Delivery is best-effort: a failed send is reported distinctly so the caller
//! can log and continue instead of aborting the cycle.

use std::fmt;

use async_trait::async_trait;

/// Result type alias for notification delivery.
pub type NotifyResult = Result<(), NotifyError>;

/// Errors that can occur while delivering a notification
#[derive(Debug)]
pub enum NotifyError {
    /// The request never reached the notification service.
    Transport(String),

    /// The service answered but refused the message (user blocked the bot,
    /// rate limiting, bad recipient).
    Rejected { status: u16, description: String },
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Transport(msg) => {
                write!(f, "failed to reach notification service: {}", msg)
            }
            NotifyError::Rejected {
                status,
                description,
            } => {
                write!(f, "notification rejected ({}): {}", status, description)
            }
        }
    }
}

impl std::error::Error for NotifyError {}

/// Best-effort delivery of a message to a user.
///
/// Implementations must be `Send + Sync`: one notifier serves every dispatch
/// of a cycle and may be shared across cycles.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `user_id`. An `Err` scopes to this one delivery;
    /// callers are expected to log it and move on.
    async fn send(&self, user_id: i64, text: &str) -> NotifyResult;
}
