//! Filtering, search and ordering over an in-memory listing collection.
//!
//! Everything here is a pure function of its inputs: the collection is
//! only read, and results are owned clones in a fresh `Vec`.

use crate::error::{NotFoundError, Result};
use crate::models::PropertyRecord;
use crate::services::types::{nonzero, positive, QueryCriteria, RecordKey, SortOrder};
use std::cmp::Ordering;

/// Apply `criteria` to `properties`.
///
/// Filters are cumulative across kinds (price, type, bedrooms,
/// bathrooms, size, amenities); within the amenity filter a single
/// shared amenity is enough. Sorting runs last over the survivors and is
/// stable, so ties keep collection order.
pub fn query(properties: &[PropertyRecord], criteria: &QueryCriteria) -> Vec<PropertyRecord> {
    let mut matched: Vec<PropertyRecord> = properties
        .iter()
        .filter(|p| matches(p, criteria))
        .cloned()
        .collect();

    if let Some(order) = &criteria.sort_by {
        sort(&mut matched, order);
    }

    matched
}

fn matches(property: &PropertyRecord, criteria: &QueryCriteria) -> bool {
    if let Some(min) = nonzero(criteria.price_min) {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = nonzero(criteria.price_max) {
        if property.price > max {
            return false;
        }
    }
    if !criteria.property_types.is_empty()
        && !criteria.property_types.contains(&property.property_type)
    {
        return false;
    }
    if let Some(min) = nonzero(criteria.bedrooms_min) {
        if property.bedrooms < min {
            return false;
        }
    }
    if let Some(min) = positive(criteria.bathrooms_min) {
        if property.bathrooms < min {
            return false;
        }
    }
    if let Some(min) = nonzero(criteria.square_feet_min) {
        if property.square_feet < min {
            return false;
        }
    }
    if !criteria.amenities.is_empty()
        && !criteria.amenities.iter().any(|a| property.has_amenity(a))
    {
        return false;
    }
    true
}

/// Stable in-place sort. `Unrecognized` leaves the order alone.
pub fn sort(properties: &mut [PropertyRecord], order: &SortOrder) {
    if let SortOrder::Unrecognized(_) = order {
        return;
    }
    properties.sort_by(|a, b| compare(a, b, order));
}

fn compare(a: &PropertyRecord, b: &PropertyRecord, order: &SortOrder) -> Ordering {
    match order {
        SortOrder::PriceLow => a.price.cmp(&b.price),
        SortOrder::PriceHigh => b.price.cmp(&a.price),
        SortOrder::Newest => b.listing_date.cmp(&a.listing_date),
        SortOrder::Oldest => a.listing_date.cmp(&b.listing_date),
        SortOrder::SizeLarge => b.square_feet.cmp(&a.square_feet),
        SortOrder::SizeSmall => a.square_feet.cmp(&b.square_feet),
        SortOrder::Unrecognized(_) => Ordering::Equal,
    }
}

/// Case-insensitive substring search over title, street, city, state
/// and description.
///
/// An absent or empty query matches nothing. Matches keep collection
/// order; there is no ranking.
pub fn search(properties: &[PropertyRecord], query: Option<&str>) -> Vec<PropertyRecord> {
    let needle = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return Vec::new(),
    };

    properties
        .iter()
        .filter(|p| {
            [
                p.title.as_str(),
                p.address.street.as_str(),
                p.address.city.as_str(),
                p.address.state.as_str(),
                p.description.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Look up a listing by id, returning an owned copy
pub fn get_by_id<K>(properties: &[PropertyRecord], id: &K) -> Result<PropertyRecord>
where
    K: RecordKey + ?Sized,
{
    id.record_id()
        .and_then(|wanted| properties.iter().find(|p| u64::from(p.id) == wanted))
        .cloned()
        .ok_or_else(|| NotFoundError::property(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordKind;
    use crate::models::PropertyType;
    use crate::test_support::{day, property, with_amenities};

    fn ids(properties: &[PropertyRecord]) -> Vec<u32> {
        properties.iter().map(|p| p.id).collect()
    }

    fn catalog() -> Vec<PropertyRecord> {
        let mut a = property(1, "Malibu");
        a.price = 2_400_000;
        a.square_feet = 3_200;
        a.bedrooms = 4;
        a.bathrooms = 3.5;
        a.listing_date = day(10);
        a.title = "Oceanfront Modern".to_string();

        let mut b = property(2, "Los Angeles");
        b.price = 850_000;
        b.square_feet = 1_200;
        b.bedrooms = 2;
        b.bathrooms = 2.0;
        b.property_type = PropertyType::Condo;
        b.listing_date = day(20);

        let mut c = property(3, "Aspen");
        c.price = 1_750_000;
        c.square_feet = 2_600;
        c.bedrooms = 3;
        c.bathrooms = 2.5;
        c.property_type = PropertyType::Townhouse;
        c.listing_date = day(5);
        c.description = "Ski-in lodge near the lifts".to_string();

        let mut d = property(4, "Greenwich");
        d.price = 3_100_000;
        d.square_feet = 4_800;
        d.bedrooms = 5;
        d.bathrooms = 4.5;
        d.listing_date = day(15);
        d.address.state = "CT".to_string();

        vec![
            with_amenities(a, &["Ocean View", "Swimming Pool"]),
            with_amenities(b, &["City View", "Balcony"]),
            with_amenities(c, &["Mountain View", "Fireplace", "Hot Tub"]),
            with_amenities(d, &["Garden", "Swimming Pool", "Wine Cellar"]),
        ]
    }

    #[test]
    fn price_min_keeps_exactly_the_listings_at_or_above() {
        let properties = catalog();
        let criteria = QueryCriteria {
            price_min: Some(1_750_000),
            ..QueryCriteria::default()
        };

        let result = query(&properties, &criteria);
        assert_eq!(ids(&result), vec![1, 3, 4]);
        assert!(result.iter().all(|p| p.price >= 1_750_000));
    }

    #[test]
    fn bounds_are_inclusive_and_combine() {
        let properties = catalog();
        let criteria = QueryCriteria {
            price_min: Some(850_000),
            price_max: Some(2_400_000),
            bedrooms_min: Some(3),
            bathrooms_min: Some(2.5),
            square_feet_min: Some(2_600),
            ..QueryCriteria::default()
        };

        assert_eq!(ids(&query(&properties, &criteria)), vec![1, 3]);
    }

    #[test]
    fn property_types_restrict_only_when_present() {
        let properties = catalog();
        let criteria = QueryCriteria {
            property_types: vec![PropertyType::Condo, PropertyType::Townhouse],
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&query(&properties, &criteria)), vec![2, 3]);

        assert_eq!(
            ids(&query(&properties, &QueryCriteria::default())),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn amenities_match_any_requested_tag() {
        let properties = vec![
            with_amenities(property(1, "Malibu"), &["Pool"]),
            with_amenities(property(2, "Malibu"), &["Pool", "Garden"]),
        ];

        let garden = QueryCriteria {
            amenities: vec!["Garden".to_string()],
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&query(&properties, &garden)), vec![2]);

        let either = QueryCriteria {
            amenities: vec!["Pool".to_string(), "Garden".to_string()],
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&query(&properties, &either)), vec![1, 2]);
    }

    #[test]
    fn zero_and_nan_bounds_filter_nothing() {
        let properties = catalog();
        let criteria = QueryCriteria {
            price_min: Some(0),
            price_max: Some(0),
            bedrooms_min: Some(0),
            bathrooms_min: Some(f32::NAN),
            square_feet_min: Some(0),
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&query(&properties, &criteria)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn price_orders_are_exact_reverses() {
        let properties = catalog();
        let low = query(
            &properties,
            &QueryCriteria {
                sort_by: Some(SortOrder::PriceLow),
                ..QueryCriteria::default()
            },
        );
        let high = query(
            &properties,
            &QueryCriteria {
                sort_by: Some(SortOrder::PriceHigh),
                ..QueryCriteria::default()
            },
        );

        assert_eq!(ids(&low), vec![2, 3, 1, 4]);
        let mut reversed = ids(&high);
        reversed.reverse();
        assert_eq!(ids(&low), reversed);
    }

    #[test]
    fn date_and_size_orders() {
        let properties = catalog();
        let sorted = |order: SortOrder| {
            ids(&query(
                &properties,
                &QueryCriteria {
                    sort_by: Some(order),
                    ..QueryCriteria::default()
                },
            ))
        };

        assert_eq!(sorted(SortOrder::Newest), vec![2, 4, 1, 3]);
        assert_eq!(sorted(SortOrder::Oldest), vec![3, 1, 4, 2]);
        assert_eq!(sorted(SortOrder::SizeLarge), vec![4, 1, 3, 2]);
        assert_eq!(sorted(SortOrder::SizeSmall), vec![2, 3, 1, 4]);
        assert_eq!(
            sorted(SortOrder::from("most-popular")),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut properties: Vec<PropertyRecord> =
            (1..=4).map(|id| property(id, "Aspen")).collect();
        for p in &mut properties {
            p.price = 1_000_000;
        }

        sort(&mut properties, &SortOrder::PriceHigh);
        assert_eq!(ids(&properties), vec![1, 2, 3, 4]);
    }

    #[test]
    fn sorting_happens_after_filtering() {
        let properties = catalog();
        let criteria = QueryCriteria {
            amenities: vec!["Swimming Pool".to_string()],
            sort_by: Some(SortOrder::SizeSmall),
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&query(&properties, &criteria)), vec![1, 4]);
    }

    #[test]
    fn query_leaves_input_untouched() {
        let properties = catalog();
        let before = properties.clone();
        let _ = query(
            &properties,
            &QueryCriteria {
                sort_by: Some(SortOrder::PriceHigh),
                ..QueryCriteria::default()
            },
        );
        assert_eq!(properties, before);
    }

    #[test]
    fn empty_or_missing_search_returns_nothing() {
        let properties = catalog();
        assert!(search(&properties, Some("")).is_empty());
        assert!(search(&properties, None).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let properties = catalog();

        let lower = search(&properties, Some("malibu"));
        let upper = search(&properties, Some("MALIBU"));
        assert_eq!(ids(&lower), vec![1]);
        assert_eq!(lower, upper);

        assert_eq!(ids(&search(&properties, Some("ct"))), vec![4]);
        assert_eq!(ids(&search(&properties, Some("ski-in"))), vec![3]);
        assert_eq!(ids(&search(&properties, Some("oceanfront"))), vec![1]);
    }

    #[test]
    fn search_keeps_collection_order() {
        let properties = catalog();
        assert_eq!(ids(&search(&properties, Some("main st"))), vec![1, 2, 3, 4]);
        assert!(search(&properties, Some("houston")).is_empty());
    }

    #[test]
    fn get_by_id_returns_detached_copy() {
        let properties = catalog();

        let mut first = get_by_id(&properties, &3u32).unwrap();
        first.title = "Changed".to_string();
        first.amenities.clear();

        let second = get_by_id(&properties, "3").unwrap();
        assert_eq!(second.title, "Listing 3");
        assert_eq!(second.amenities.len(), 3);
    }

    #[test]
    fn get_by_id_reports_missing_keys() {
        let properties = catalog();

        let err = get_by_id(&properties, &99u32).unwrap_err();
        assert_eq!(err.kind, RecordKind::Property);
        assert_eq!(err.key, "99");

        assert!(get_by_id(&properties, "abc").is_err());
        assert_eq!(get_by_id(&properties, "2abc").unwrap().id, 2);
    }
}
