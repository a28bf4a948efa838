//! Browse, search, filter and bookmark real-estate listings held in memory.

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;

pub use api::{ApiOptions, ListingApi, SavedListing};
pub use config::AppConfig;
pub use error::{NotFoundError, RecordKind};
pub use fixtures::{load_snapshot, Snapshot};
pub use models::{
    Address, NewSavedProperty, PropertyRecord, PropertyType, SavedPropertyPatch,
    SavedPropertyRecord,
};
pub use services::{QueryCriteria, SortOrder};
