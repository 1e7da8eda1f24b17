use chrono::{DateTime, Utc};

use crate::probe::{ProbeOutcome, ProbeResult};

/// Certificates with strictly fewer than this many whole days left trigger an
/// expiry alert. Exactly seven days left does not alert.
pub const SSL_EXPIRY_WARNING_DAYS: i64 = 7;

/// A single notification owed to a monitor's owner. At most one is produced
/// per monitor per cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The site did not respond, or responded with a server error.
    Unavailable {
        url: String,
        /// The transport error, or `Status <code>` for a server-error response.
        reason: String,
    },
    /// The site is up but its certificate is about to expire (or already has).
    CertificateExpiring {
        url: String,
        expires_at: Option<DateTime<Utc>>,
        days_left: i64,
    },
}

/// Decide whether a probe result warrants an alert.
///
/// Unavailability wins over certificate expiry; a down site never also
/// produces an expiry alert. An up site with no readable certificate data
/// (plain http, unparseable certificate) produces nothing.
pub fn evaluate(result: &ProbeResult) -> Option<Alert> {
    if !result.is_up() {
        let reason = match &result.outcome {
            ProbeOutcome::Failed { error } => error.clone(),
            ProbeOutcome::Responded { status, .. } => format!("Status {status}"),
        };

        return Some(Alert::Unavailable {
            url: result.url.clone(),
            reason,
        });
    }

    match result.outcome {
        ProbeOutcome::Responded {
            ssl_expires_at,
            ssl_days_left: Some(days_left),
            ..
        } if days_left < SSL_EXPIRY_WARNING_DAYS => Some(Alert::CertificateExpiring {
            url: result.url.clone(),
            expires_at: ssl_expires_at,
            days_left,
        }),
        _ => None,
    }
}

impl Alert {
    /// Render the user-facing message text.
    pub fn to_message(&self) -> String {
        match self {
            Alert::Unavailable { url, reason } => {
                format!("🔴 {url} is unavailable: {reason}")
            }
            Alert::CertificateExpiring {
                url,
                expires_at,
                days_left,
            } => {
                let date = expires_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| String::from("unknown"));

                format!("⚠️ SSL certificate for {url} expires on {date} ({days_left} days left)")
            }
        }
    }

    /// Owner of the rendered alert's target, for logging.
    pub fn url(&self) -> &str {
        match self {
            Alert::Unavailable { url, .. } | Alert::CertificateExpiring { url, .. } => url,
        }
    }
}
