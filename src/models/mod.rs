use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest saved-record id a snapshot may carry: the top of the exact
/// integer range of the JSON the fixtures come from. Each create adds one,
/// so `max + 1` stays far below `u64::MAX`.
pub const MAX_SNAPSHOT_SAVED_ID: u64 = (1 << 53) - 1;

pub(crate) fn ensure_saved_id(id: u64) -> anyhow::Result<()> {
    if id == 0 || id > MAX_SNAPSHOT_SAVED_ID {
        anyhow::bail!(
            "Saved property id {} is outside 1..={}",
            id,
            MAX_SNAPSHOT_SAVED_ID
        );
    }
    Ok(())
}

pub(crate) fn ensure_property_id(id: u32) -> anyhow::Result<()> {
    if id == 0 {
        anyhow::bail!("Listing id must be positive");
    }
    Ok(())
}

/// Kind of dwelling a listing describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[serde(rename = "Single Family")]
    SingleFamily,
    #[serde(rename = "Condo")]
    Condo,
    #[serde(rename = "Townhouse")]
    Townhouse,
    #[serde(rename = "Multi-Family")]
    MultiFamily,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::SingleFamily,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::MultiFamily,
    ];

    /// Display label, identical to the serialized form
    pub fn label(self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::MultiFamily => "Multi-Family",
        }
    }

    /// Parse a display label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Postal address of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub full_address: String,
}

/// A single real-estate listing. Loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(rename = "Id", alias = "id")]
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Asking price in whole dollars
    pub price: u64,
    pub property_type: PropertyType,
    pub bedrooms: u32,
    /// Half-baths count as 0.5
    pub bathrooms: f32,
    pub square_feet: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub address: Address,
    pub images: Vec<String>,
    pub status: String,
    pub listing_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<String>,
}

impl PropertyRecord {
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }
}

/// A user's bookmark of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedPropertyRecord {
    #[serde(rename = "Id", alias = "id")]
    pub id: u64,
    /// Text form of the bookmarked `PropertyRecord::id`
    pub property_id: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub saved_date: DateTime<Utc>,
}

/// Input for creating a saved-property record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedProperty {
    pub property_id: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewSavedProperty {
    pub fn new(property_id: impl fmt::Display) -> Self {
        Self {
            property_id: property_id.to_string(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update for a saved-property record.
///
/// `id` is accepted so callers can pass a whole record back, but it is
/// always discarded on merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedPropertyPatch {
    #[serde(rename = "Id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// `Some(None)` clears the note; `None` leaves it alone
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

/// Maps a present field to `Some`, so an explicit `null` survives as
/// `Some(None)`. Absent fields fall back to `None` via `default`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SavedPropertyPatch {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(Some(notes.into())),
            ..Self::default()
        }
    }

    pub fn clear_notes() -> Self {
        Self {
            notes: Some(None),
            ..Self::default()
        }
    }

    /// Merge onto `record`, leaving its id and save date untouched
    pub(crate) fn apply_to(self, record: &mut SavedPropertyRecord) {
        let SavedPropertyPatch {
            id: _,
            property_id,
            notes,
        } = self;

        if let Some(property_id) = property_id {
            record.property_id = property_id;
        }
        if let Some(notes) = notes {
            record.notes = notes;
        }
    }
}
