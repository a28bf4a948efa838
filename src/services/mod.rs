pub mod latency;
pub mod property;
pub mod query;
pub mod regions;
pub mod saved;
pub mod traits;
pub mod types;

pub use latency::{FixedLatency, NoLatency};
pub use property::PropertyService;
pub use regions::{group_by_region, Region, RegionGroup, REGIONS};
pub use saved::{SaveToggle, SavedPropertyStore};
pub use traits::{Clock, Latency, Operation, SystemClock};
pub use types::{QueryCriteria, RecordKey, SortOrder};
