use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Service operations that carry simulated round-trip latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PropertyQuery,
    PropertyGet,
    PropertySearch,
    SavedList,
    SavedGet,
    SavedCreate,
    SavedUpdate,
    SavedDelete,
    SavedCheck,
}

/// Simulated I/O seam. Every service call awaits `pause` once before
/// touching its data, so callers see the same timing they would against
/// a remote backend. Swap in `NoLatency` to run without timers.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn pause(&self, operation: Operation);
}

/// Source of save timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
