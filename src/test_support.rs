//! Builders shared by unit tests.

use crate::models::{Address, PropertyRecord, PropertyType};
use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, n, 12, 0, 0).unwrap()
}

pub(crate) fn property(id: u32, city: &str) -> PropertyRecord {
    PropertyRecord {
        id,
        title: format!("Listing {id}"),
        description: "Bright rooms and a quiet street".to_string(),
        price: 500_000 + u64::from(id) * 100_000,
        property_type: PropertyType::SingleFamily,
        bedrooms: 3,
        bathrooms: 2.0,
        square_feet: 1_500 + id * 100,
        amenities: Vec::new(),
        address: Address {
            street: format!("{id} Main St"),
            city: city.to_string(),
            state: "CA".to_string(),
            zip_code: "90000".to_string(),
            full_address: format!("{id} Main St, {city}, CA 90000"),
        },
        images: vec![format!("listing-{id}.jpg")],
        status: "Active".to_string(),
        listing_date: day(id.clamp(1, 28)),
        year_built: None,
        lot_size: None,
    }
}

pub(crate) fn with_amenities(mut property: PropertyRecord, amenities: &[&str]) -> PropertyRecord {
    property.amenities = amenities.iter().map(|a| a.to_string()).collect();
    property
}
