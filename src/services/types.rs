use crate::models::PropertyType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter and sort configuration for a property query.
///
/// Every field is optional; an absent field, an empty list or a zero
/// bound places no restriction on the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryCriteria {
    /// Inclusive lower price bound (dollars)
    pub price_min: Option<u64>,
    /// Inclusive upper price bound (dollars)
    pub price_max: Option<u64>,
    /// Accepted property types
    pub property_types: Vec<PropertyType>,
    pub bedrooms_min: Option<u32>,
    pub bathrooms_min: Option<f32>,
    pub square_feet_min: Option<u32>,
    /// A listing passes if it has at least one of these
    pub amenities: Vec<String>,
    pub sort_by: Option<SortOrder>,
}

impl QueryCriteria {
    /// True when no filter would narrow the collection
    pub fn is_unfiltered(&self) -> bool {
        nonzero(self.price_min).is_none()
            && nonzero(self.price_max).is_none()
            && self.property_types.is_empty()
            && nonzero(self.bedrooms_min).is_none()
            && positive(self.bathrooms_min).is_none()
            && nonzero(self.square_feet_min).is_none()
            && self.amenities.is_empty()
    }
}

pub(crate) fn nonzero<T: Default + PartialEq>(bound: Option<T>) -> Option<T> {
    bound.filter(|v| *v != T::default())
}

/// NaN and non-positive values count as absent
pub(crate) fn positive(bound: Option<f32>) -> Option<f32> {
    bound.filter(|v| *v > 0.0)
}

/// Result ordering for a property query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    SizeLarge,
    SizeSmall,
    /// Any other key; keeps input order
    Unrecognized(String),
}

impl SortOrder {
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::SizeLarge => "size-large",
            SortOrder::SizeSmall => "size-small",
            SortOrder::Unrecognized(key) => key,
        }
    }
}

impl From<&str> for SortOrder {
    fn from(key: &str) -> Self {
        match key {
            "newest" => SortOrder::Newest,
            "oldest" => SortOrder::Oldest,
            "price-low" => SortOrder::PriceLow,
            "price-high" => SortOrder::PriceHigh,
            "size-large" => SortOrder::SizeLarge,
            "size-small" => SortOrder::SizeSmall,
            other => SortOrder::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SortOrder {
    fn from(key: String) -> Self {
        SortOrder::from(key.as_str())
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.as_str().to_string()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything a record can be looked up by.
///
/// Text keys resolve the way a lenient integer parse does: leading
/// whitespace is skipped, leading digits are taken and anything after
/// them is ignored. Text without leading digits resolves to nothing.
pub trait RecordKey: fmt::Display {
    fn record_id(&self) -> Option<u64>;
}

impl RecordKey for u32 {
    fn record_id(&self) -> Option<u64> {
        Some(u64::from(*self))
    }
}

impl RecordKey for u64 {
    fn record_id(&self) -> Option<u64> {
        Some(*self)
    }
}

impl RecordKey for str {
    fn record_id(&self) -> Option<u64> {
        let trimmed = self.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        unsigned[..end].parse().ok()
    }
}

impl RecordKey for String {
    fn record_id(&self) -> Option<u64> {
        self.as_str().record_id()
    }
}

impl<K: RecordKey + ?Sized> RecordKey for &K {
    fn record_id(&self) -> Option<u64> {
        (**self).record_id()
    }
}
