use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const FIXTURES_DIR_VAR: &str = "LISTING_FIXTURES_DIR";
pub const LATENCY_VAR: &str = "LISTING_LATENCY";
pub const REQUIRE_KNOWN_PROPERTY_VAR: &str = "LISTING_REQUIRE_KNOWN_PROPERTY";

/// Runtime settings, read from the environment (and `.env` if present)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `properties.json` and `saved_properties.json`
    pub fixtures_dir: PathBuf,
    /// Simulate backend round-trip delays
    pub latency: bool,
    /// Reject saves of property ids missing from the catalog
    pub require_known_property: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from("fixtures"),
            latency: true,
            require_known_property: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(FIXTURES_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.fixtures_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(LATENCY_VAR) {
            config.latency =
                parse_flag(&value).with_context(|| format!("Invalid {}", LATENCY_VAR))?;
        }
        if let Some(value) = lookup(REQUIRE_KNOWN_PROPERTY_VAR) {
            config.require_known_property = parse_flag(&value)
                .with_context(|| format!("Invalid {}", REQUIRE_KNOWN_PROPERTY_VAR))?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("expected on/off, got {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            (FIXTURES_DIR_VAR, "/srv/listings"),
            (LATENCY_VAR, "off"),
            (REQUIRE_KNOWN_PROPERTY_VAR, "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.fixtures_dir, PathBuf::from("/srv/listings"));
        assert!(!config.latency);
        assert!(config.require_known_property);
    }

    #[test]
    fn rejects_unknown_flag_values() {
        let err = config_from(&[(LATENCY_VAR, "sometimes")]).unwrap_err();
        assert!(err.to_string().contains(LATENCY_VAR));
    }

    #[test]
    fn blank_fixture_dir_keeps_default() {
        let config = config_from(&[(FIXTURES_DIR_VAR, "  ")]).unwrap();
        assert_eq!(config.fixtures_dir, PathBuf::from("fixtures"));
    }
}
