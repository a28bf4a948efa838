use crate::models::PropertyRecord;
use serde::Serialize;

/// A fixed area on the simulated map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: &'static str,
    /// Must equal `Address::city` exactly for a listing to land here
    pub name: &'static str,
    /// Horizontal position, percent of map width
    pub x: u8,
    /// Vertical position, percent of map height
    pub y: u8,
}

pub const REGIONS: [Region; 5] = [
    Region { id: "malibu", name: "Malibu", x: 15, y: 60 },
    Region { id: "la", name: "Los Angeles", x: 25, y: 65 },
    Region { id: "sf", name: "San Francisco", x: 20, y: 25 },
    Region { id: "aspen", name: "Aspen", x: 60, y: 40 },
    Region { id: "greenwich", name: "Greenwich", x: 80, y: 35 },
];

/// Listings placed in one region
#[derive(Debug, Clone, Serialize)]
pub struct RegionGroup {
    pub region: Region,
    pub properties: Vec<PropertyRecord>,
}

/// Place each listing in the region named after its city.
///
/// Every region is returned, in map order, even when empty. Listings in
/// cities without a region are left off the map.
pub fn group_by_region(properties: &[PropertyRecord]) -> Vec<RegionGroup> {
    REGIONS
        .iter()
        .map(|region| RegionGroup {
            region: *region,
            properties: properties
                .iter()
                .filter(|p| p.address.city == region.name)
                .cloned()
                .collect(),
        })
        .collect()
}
