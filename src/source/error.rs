//! Error types for monitor source operations

use std::fmt;

/// Result type alias for monitor source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while querying the monitor set
#[derive(Debug)]
pub enum SourceError {
    /// The backing store could not be reached
    Unavailable(String),

    /// The query itself failed
    QueryFailed(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(msg) => {
                write!(f, "monitor source unavailable: {}", msg)
            }
            SourceError::QueryFailed(msg) => write!(f, "monitor query failed: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}
