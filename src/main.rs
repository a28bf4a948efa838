use anyhow::Result;
use clap::Parser;
use listing_scout::services::{group_by_region, FixedLatency, Latency, NoLatency};
use listing_scout::{
    load_snapshot, ApiOptions, AppConfig, ListingApi, PropertyRecord, PropertyType,
    QueryCriteria, SortOrder,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-scout")]
#[command(about = "Browse and filter real-estate listings from local fixtures")]
#[command(version)]
struct Cli {
    /// Directory with properties.json and saved_properties.json
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Free-text search; when set, filters are ignored
    #[arg(short, long)]
    search: Option<String>,

    #[arg(long)]
    price_min: Option<u64>,

    #[arg(long)]
    price_max: Option<u64>,

    /// Property type, e.g. "Condo" (repeatable)
    #[arg(long = "type", value_parser = parse_property_type)]
    types: Vec<PropertyType>,

    /// Minimum bedrooms
    #[arg(long)]
    beds: Option<u32>,

    /// Minimum bathrooms
    #[arg(long)]
    baths: Option<f32>,

    /// Minimum square feet
    #[arg(long)]
    sqft: Option<u32>,

    /// Amenity to look for (repeatable, any match)
    #[arg(long = "amenity")]
    amenities: Vec<String>,

    /// newest, oldest, price-low, price-high, size-large or size-small
    #[arg(long, default_value = "newest")]
    sort: String,

    /// Group results by map region
    #[arg(long)]
    regions: bool,

    /// Skip simulated backend delays
    #[arg(long)]
    no_latency: bool,

    /// Write results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn criteria(&self) -> QueryCriteria {
        QueryCriteria {
            price_min: self.price_min,
            price_max: self.price_max,
            property_types: self.types.clone(),
            bedrooms_min: self.beds,
            bathrooms_min: self.baths,
            square_feet_min: self.sqft,
            amenities: self.amenities.clone(),
            sort_by: Some(SortOrder::from(self.sort.as_str())),
        }
    }
}

fn parse_property_type(label: &str) -> Result<PropertyType, String> {
    PropertyType::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = PropertyType::ALL.iter().map(|t| t.label()).collect();
        format!("unknown property type {:?} (expected one of: {})", label, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    info!("🏠 Listing Scout");
    info!("================");

    let fixtures_dir = cli.fixtures.clone().unwrap_or(config.fixtures_dir.clone());
    let snapshot = load_snapshot(&fixtures_dir).await?;

    let latency: Arc<dyn Latency> = if config.latency && !cli.no_latency {
        Arc::new(FixedLatency::default())
    } else {
        Arc::new(NoLatency)
    };
    let api = ListingApi::from_snapshot(
        snapshot,
        latency,
        ApiOptions {
            require_known_property: config.require_known_property,
        },
    )?;

    let criteria = cli.criteria();
    let properties = api.browse(cli.search.as_deref(), &criteria).await;
    let saved: HashSet<String> = api
        .list_saved()
        .await
        .into_iter()
        .map(|s| s.property_id)
        .collect();

    match cli.search.as_deref() {
        Some(text) if !text.is_empty() => {
            info!("\n✅ {} listings match \"{}\"\n", properties.len(), text)
        }
        _ => info!("\n✅ {} listings match filters\n", properties.len()),
    }

    if cli.regions {
        for group in group_by_region(&properties) {
            println!("📍 {} ({} listings)", group.region.name, group.properties.len());
            for property in &group.properties {
                print_listing(property, saved.contains(&property.id.to_string()));
            }
        }
    } else {
        for (i, property) in properties.iter().enumerate() {
            print!("{}. ", i + 1);
            print_listing(property, saved.contains(&property.id.to_string()));
        }
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&properties)?;
        tokio::fs::write(path, json).await?;
        info!("💾 Saved {} listings to {}", properties.len(), path.display());
    }

    Ok(())
}

fn print_listing(property: &PropertyRecord, saved: bool) {
    let marker = if saved { " ♥" } else { "" };
    println!("{} ({}){}", property.title, format_price(property.price), marker);
    println!(
        "   {} · {} bd, {} ba, {} sqft",
        property.property_type, property.bedrooms, property.bathrooms, property.square_feet
    );
    println!("   {}", property.address.full_address);
    if !property.amenities.is_empty() {
        println!("   Amenities: {}", property.amenities.join(", "));
    }
    println!("   Listed: {}", property.listing_date.format("%B %-d, %Y"));
    println!("   ID: {}", property.id);
    println!();
}

/// US dollars, no cents, comma thousands separators
fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_thousands_separators() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(950), "$950");
        assert_eq!(format_price(1_000), "$1,000");
        assert_eq!(format_price(4_750_000), "$4,750,000");
        assert_eq!(format_price(125_000), "$125,000");
    }

    #[test]
    fn cli_flags_become_criteria() {
        let cli = Cli::parse_from([
            "listing-scout",
            "--price-min",
            "900000",
            "--type",
            "condo",
            "--type",
            "Multi-Family",
            "--amenity",
            "Balcony",
            "--sort",
            "price-low",
        ]);

        let criteria = cli.criteria();
        assert_eq!(criteria.price_min, Some(900_000));
        assert_eq!(
            criteria.property_types,
            vec![PropertyType::Condo, PropertyType::MultiFamily]
        );
        assert_eq!(criteria.amenities, vec!["Balcony".to_string()]);
        assert_eq!(criteria.sort_by, Some(SortOrder::PriceLow));
    }

    #[test]
    fn unknown_property_type_is_a_usage_error() {
        let err = Cli::try_parse_from(["listing-scout", "--type", "castle"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("castle"));

        assert!(Cli::try_parse_from(["listing-scout", "--type", "townhouse"]).is_ok());
    }
}
