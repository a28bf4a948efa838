//! In-process call surface for a presentation layer.
//!
//! The listing catalog and the saved-property store never talk to each
//! other; this is the one place their outputs are joined by property id.

use crate::error::{NotFoundError, Result};
use crate::fixtures::Snapshot;
use crate::models::{NewSavedProperty, PropertyRecord, SavedPropertyPatch, SavedPropertyRecord};
use crate::services::{
    Latency, PropertyService, QueryCriteria, RecordKey, SaveToggle, SavedPropertyStore,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiOptions {
    /// Reject saves whose property id does not resolve to a listing
    pub require_known_property: bool,
}

/// A saved record together with the listing it points at
#[derive(Debug, Clone, Serialize)]
pub struct SavedListing {
    pub saved: SavedPropertyRecord,
    pub property: PropertyRecord,
}

pub struct ListingApi {
    properties: PropertyService,
    saved: SavedPropertyStore,
    options: ApiOptions,
}

impl ListingApi {
    pub fn new(properties: PropertyService, saved: SavedPropertyStore, options: ApiOptions) -> Self {
        Self {
            properties,
            saved,
            options,
        }
    }

    /// Build both services from one fixture snapshot sharing `latency`
    pub fn from_snapshot(
        snapshot: Snapshot,
        latency: Arc<dyn Latency>,
        options: ApiOptions,
    ) -> anyhow::Result<Self> {
        let properties = PropertyService::new(snapshot.properties, Arc::clone(&latency));
        let saved = SavedPropertyStore::init(snapshot.saved, latency)?;
        Ok(Self::new(properties, saved, options))
    }

    pub fn properties(&self) -> &PropertyService {
        &self.properties
    }

    pub fn saved(&self) -> &SavedPropertyStore {
        &self.saved
    }

    pub async fn query_properties(&self, criteria: &QueryCriteria) -> Vec<PropertyRecord> {
        self.properties.query(criteria).await
    }

    pub async fn search_properties(&self, text: Option<&str>) -> Vec<PropertyRecord> {
        self.properties.search(text).await
    }

    pub async fn get_property<K>(&self, id: &K) -> Result<PropertyRecord>
    where
        K: RecordKey + ?Sized,
    {
        self.properties.get_by_id(id).await
    }

    /// A non-empty search term wins and the criteria are ignored;
    /// otherwise the criteria drive a filtered, sorted query.
    pub async fn browse(&self, search: Option<&str>, criteria: &QueryCriteria) -> Vec<PropertyRecord> {
        match search {
            Some(text) if !text.is_empty() => self.properties.search(Some(text)).await,
            _ => self.properties.query(criteria).await,
        }
    }

    pub async fn list_saved(&self) -> Vec<SavedPropertyRecord> {
        self.saved.get_all().await
    }

    pub async fn get_saved<K>(&self, id: &K) -> Result<SavedPropertyRecord>
    where
        K: RecordKey + ?Sized,
    {
        self.saved.get_by_id(id).await
    }

    pub async fn save_property(&self, mut input: NewSavedProperty) -> Result<SavedPropertyRecord> {
        input.property_id = self.resolve_property_id(input.property_id)?;
        Ok(self.saved.create(input).await)
    }

    pub async fn update_saved<K>(&self, id: &K, patch: SavedPropertyPatch) -> Result<SavedPropertyRecord>
    where
        K: RecordKey + ?Sized,
    {
        self.saved.update(id, patch).await
    }

    pub async fn unsave_property<K>(&self, id: &K) -> Result<bool>
    where
        K: RecordKey + ?Sized,
    {
        self.saved.delete(id).await
    }

    pub async fn is_property_saved<P>(&self, property_id: &P) -> bool
    where
        P: fmt::Display + ?Sized,
    {
        self.saved.is_saved(property_id).await
    }

    /// Flip the saved state of a listing, saving with empty notes
    pub async fn toggle_saved<P>(&self, property_id: &P) -> Result<SaveToggle>
    where
        P: fmt::Display + ?Sized,
    {
        let property_id = self.resolve_property_id(property_id.to_string())?;
        Ok(self.saved.toggle(property_id.as_str(), Some(String::new())).await)
    }

    pub async fn clear_saved(&self) -> usize {
        self.saved.clear_all().await
    }

    /// Every saved record joined to its listing, in saved order.
    ///
    /// Fails on the first record whose property id no longer resolves.
    pub async fn saved_listings(&self) -> Result<Vec<SavedListing>> {
        let saved = self.saved.get_all().await;
        let mut listings = Vec::with_capacity(saved.len());

        for record in saved {
            let property = self
                .properties
                .get_by_id(record.property_id.as_str())
                .await
                .map_err(|err| {
                    warn!(
                        saved_id = record.id,
                        property_id = %record.property_id,
                        "Saved record points at a missing listing"
                    );
                    err
                })?;
            listings.push(SavedListing {
                saved: record,
                property,
            });
        }

        Ok(listings)
    }

    /// With `require_known_property` set, the id must resolve to a listing
    /// and is rewritten to that listing's canonical id, so `"2abc"` is
    /// stored as `"2"`. Otherwise the text is kept as given.
    fn resolve_property_id(&self, property_id: String) -> Result<String> {
        if !self.options.require_known_property {
            return Ok(property_id);
        }

        match property_id.record_id() {
            Some(id) if self.properties.contains(&id) => Ok(id.to_string()),
            _ => {
                warn!(property_id = %property_id, "Refusing to save unknown listing");
                Err(NotFoundError::property(property_id))
            }
        }
    }
}
