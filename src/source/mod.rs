//! Monitor sources: where the set of registered monitors comes from
//!
//! The check cycle consumes monitors through the narrow [`MonitorSource`]
//! read contract; registration, editing and persistence are the concern of
//! whatever sits behind it.
//!
//! ## Design
//!
//! - **Trait-based**: `MonitorSource` allows swapping implementations
//! - **Async**: all operations are async for compatibility with Tokio
//! - **Read-only toward the cycle**: the cycle never mutates monitors
//!
//! ## Implementations
//!
//! - **In-memory** (default): config-seeded, also used by tests
//! - Database-backed sources can implement the same trait

pub mod error;
pub mod memory;

use async_trait::async_trait;

use crate::Monitor;

/// Read access to the registered monitors.
///
/// Implementations must be `Send + Sync` as the cycle holds them across
/// await points.
#[async_trait]
pub trait MonitorSource: Send + Sync {
    /// All monitors with `is_active = true`, ordered by id ascending.
    ///
    /// "No monitors" is an empty vec, not an error; `Err` is reserved for
    /// genuine I/O failure and aborts the calling cycle.
    async fn list_active_monitors(&self) -> SourceResult<Vec<Monitor>>;
}

pub use error::{SourceError, SourceResult};
pub use memory::MemoryMonitorSource;
