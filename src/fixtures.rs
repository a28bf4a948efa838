use crate::models::{
    ensure_property_id, ensure_saved_id, PropertyRecord, SavedPropertyRecord,
};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

pub const PROPERTIES_FILE: &str = "properties.json";
pub const SAVED_PROPERTIES_FILE: &str = "saved_properties.json";

/// Initial state for both services, read once at start
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub properties: Vec<PropertyRecord>,
    pub saved: Vec<SavedPropertyRecord>,
}

/// Load `properties.json` and `saved_properties.json` from `dir`.
///
/// The saved file is optional; the listing file is not.
pub async fn load_snapshot(dir: impl AsRef<Path>) -> Result<Snapshot> {
    let dir = dir.as_ref();

    let path = dir.join(PROPERTIES_FILE);
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let properties = parse_properties(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let path = dir.join(SAVED_PROPERTIES_FILE);
    let saved = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => parse_saved(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("No {} found, starting with no saved properties", path.display());
            Vec::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    info!(
        "📂 Loaded {} listings and {} saved properties from {}",
        properties.len(),
        saved.len(),
        dir.display()
    );

    Ok(Snapshot { properties, saved })
}

pub fn parse_properties(raw: &str) -> Result<Vec<PropertyRecord>> {
    let properties: Vec<PropertyRecord> =
        serde_json::from_str(raw).context("Invalid listing JSON")?;

    let mut seen = HashSet::new();
    for property in &properties {
        ensure_property_id(property.id)?;
        if !seen.insert(property.id) {
            warn!("Duplicate listing id {}", property.id);
        }
        if property.images.is_empty() {
            warn!("Listing {} has no images", property.id);
        }
    }

    Ok(properties)
}

pub fn parse_saved(raw: &str) -> Result<Vec<SavedPropertyRecord>> {
    let saved: Vec<SavedPropertyRecord> =
        serde_json::from_str(raw).context("Invalid saved-property JSON")?;

    let mut seen = HashSet::new();
    for record in &saved {
        ensure_saved_id(record.id)
            .with_context(|| format!("Bad saved property for listing {}", record.property_id))?;
        if !seen.insert(record.id) {
            warn!("Duplicate saved-property id {}", record.id);
        }
    }

    Ok(saved)
}
