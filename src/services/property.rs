use crate::error::Result;
use crate::models::PropertyRecord;
use crate::services::query;
use crate::services::traits::{Latency, Operation};
use crate::services::types::{QueryCriteria, RecordKey};
use std::sync::Arc;
use tracing::{debug, info};

/// Read-only listing catalog with simulated backend latency
#[derive(Clone)]
pub struct PropertyService {
    properties: Arc<Vec<PropertyRecord>>,
    latency: Arc<dyn Latency>,
}

impl PropertyService {
    /// Take ownership of the listing snapshot. It is never modified again.
    pub fn new(properties: Vec<PropertyRecord>, latency: Arc<dyn Latency>) -> Self {
        info!("Loaded {} listings", properties.len());
        Self {
            properties: Arc::new(properties),
            latency,
        }
    }

    /// Filter and sort the catalog
    pub async fn query(&self, criteria: &QueryCriteria) -> Vec<PropertyRecord> {
        self.latency.pause(Operation::PropertyQuery).await;

        let result = query::query(&self.properties, criteria);
        debug!(
            matched = result.len(),
            total = self.properties.len(),
            sort = ?criteria.sort_by,
            "Queried listings"
        );
        result
    }

    /// Free-text search; `None` or `""` yields no listings
    pub async fn search(&self, text: Option<&str>) -> Vec<PropertyRecord> {
        self.latency.pause(Operation::PropertySearch).await;

        let result = query::search(&self.properties, text);
        debug!(query = ?text, matched = result.len(), "Searched listings");
        result
    }

    pub async fn get_by_id<K>(&self, id: &K) -> Result<PropertyRecord>
    where
        K: RecordKey + ?Sized,
    {
        self.latency.pause(Operation::PropertyGet).await;
        query::get_by_id(&self.properties, id)
    }

    /// Whether `id` resolves to a listing. No simulated latency.
    pub fn contains<K>(&self, id: &K) -> bool
    where
        K: RecordKey + ?Sized,
    {
        id.record_id()
            .map_or(false, |wanted| self.properties.iter().any(|p| u64::from(p.id) == wanted))
    }

    /// Copy of the whole catalog in load order
    pub fn all(&self) -> Vec<PropertyRecord> {
        self.properties.as_ref().clone()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
