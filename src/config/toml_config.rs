use crate::domain::model::{RateTable, MAX_BOATS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FieldError, MarinaError, Result};
use crate::utils::validation::{validate_non_negative, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarinaConfig {
    pub marina: MarinaSection,
    pub rates: RatesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarinaSection {
    pub capacity: usize,
}

impl Default for MarinaSection {
    fn default() -> Self {
        Self {
            capacity: MAX_BOATS,
        }
    }
}

/// Dollars per foot per month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesSection {
    pub slip: f64,
    pub land: f64,
    pub trailer: f64,
    pub storage: f64,
}

impl Default for RatesSection {
    fn default() -> Self {
        let rates = RateTable::default();
        Self {
            slip: rates.slip,
            land: rates.land,
            trailer: rates.trailer,
            storage: rates.storage,
        }
    }
}

impl MarinaConfig {
    /// Loads settings from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MarinaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| MarinaError::config("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    pub fn validate_config(&self) -> std::result::Result<(), FieldError> {
        validate_range("marina.capacity", self.marina.capacity, 1, MAX_BOATS)?;
        validate_non_negative("rates.slip", self.rates.slip)?;
        validate_non_negative("rates.land", self.rates.land)?;
        validate_non_negative("rates.trailer", self.rates.trailer)?;
        validate_non_negative("rates.storage", self.rates.storage)?;
        Ok(())
    }
}

impl ConfigProvider for MarinaConfig {
    fn capacity(&self) -> usize {
        self.marina.capacity
    }

    fn rates(&self) -> RateTable {
        RateTable {
            slip: self.rates.slip,
            land: self.rates.land,
            trailer: self.rates.trailer,
            storage: self.rates.storage,
        }
    }
}

impl Validate for MarinaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
            .map_err(|e| MarinaError::config(&e.field, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_built_in_rates() {
        let config = MarinaConfig::from_toml_str("").unwrap();

        assert_eq!(config.capacity(), MAX_BOATS);
        assert_eq!(config.rates(), RateTable::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_overrides() {
        let toml_content = r#"
[marina]
capacity = 40

[rates]
slip = 13.75
"#;

        let config = MarinaConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.capacity(), 40);
        assert_eq!(config.rates().slip, 13.75);
        assert_eq!(config.rates().land, 14.00);
        assert_eq!(config.rates().trailer, 25.00);
        assert_eq!(config.rates().storage, 11.20);
    }

    #[test]
    fn test_config_validation() {
        let too_big = MarinaConfig::from_toml_str("[marina]\ncapacity = 121\n").unwrap();
        assert!(too_big.validate().is_err());

        let zero = MarinaConfig::from_toml_str("[marina]\ncapacity = 0\n").unwrap();
        assert!(zero.validate().is_err());

        let negative = MarinaConfig::from_toml_str("[rates]\nland = -1.0\n").unwrap();
        let err = negative.validate().unwrap_err();
        assert!(err.to_string().contains("rates.land"));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = MarinaConfig::from_toml_str("[marina\ncapacity = 3").unwrap_err();
        assert!(matches!(err, MarinaError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[rates]\ntrailer = 30.0\n")
            .unwrap();

        let config = MarinaConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.rates().trailer, 30.0);
    }
}
