use crate::services::traits::{Latency, Operation};
use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

/// Sleeps a fixed duration per operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLatency {
    pub property_query: Duration,
    pub property_get: Duration,
    pub property_search: Duration,
    pub saved_list: Duration,
    pub saved_get: Duration,
    pub saved_create: Duration,
    pub saved_update: Duration,
    pub saved_delete: Duration,
    pub saved_check: Duration,
}

impl FixedLatency {
    /// Same delay for every operation
    pub fn uniform(delay: Duration) -> Self {
        Self {
            property_query: delay,
            property_get: delay,
            property_search: delay,
            saved_list: delay,
            saved_get: delay,
            saved_create: delay,
            saved_update: delay,
            saved_delete: delay,
            saved_check: delay,
        }
    }

    pub fn delay_for(&self, operation: Operation) -> Duration {
        match operation {
            Operation::PropertyQuery => self.property_query,
            Operation::PropertyGet => self.property_get,
            Operation::PropertySearch => self.property_search,
            Operation::SavedList => self.saved_list,
            Operation::SavedGet => self.saved_get,
            Operation::SavedCreate => self.saved_create,
            Operation::SavedUpdate => self.saved_update,
            Operation::SavedDelete => self.saved_delete,
            Operation::SavedCheck => self.saved_check,
        }
    }
}

impl Default for FixedLatency {
    fn default() -> Self {
        Self {
            property_query: Duration::from_millis(300),
            property_get: Duration::from_millis(250),
            property_search: Duration::from_millis(200),
            saved_list: Duration::from_millis(200),
            saved_get: Duration::from_millis(150),
            saved_create: Duration::from_millis(300),
            saved_update: Duration::from_millis(250),
            saved_delete: Duration::from_millis(200),
            saved_check: Duration::from_millis(100),
        }
    }
}

#[async_trait]
impl Latency for FixedLatency {
    async fn pause(&self, operation: Operation) {
        let delay = self.delay_for(operation);
        if delay.is_zero() {
            return;
        }
        trace!(?operation, ?delay, "simulating round-trip");
        tokio::time::sleep(delay).await;
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn pause(&self, _operation: Operation) {}
}
