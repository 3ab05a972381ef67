//! Analytics configuration.
//!
//! Bundles the tunable parameters of the scoring and aggregation
//! components with TOML persistence. Defaults reproduce the dashboard's
//! standard behavior; hosts that expose tuning UI load and save through
//! this module.

use crate::aggregation::AggregationConfig;
use crate::error::{CoreError, Result};
use crate::readiness::ReadinessConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level analytics configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Readiness scoring weights and sentinels
    pub readiness: ReadinessConfig,

    /// Aggregation tuning
    pub aggregation: AggregationConfig,
}

impl AnalyticsConfig {
    /// Default config file location under the platform config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("traincore")
            .join("config.toml")
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AnalyticsConfig = toml::from_str(&content)
            .map_err(|e| CoreError::Configuration(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist. Parse and validation failures still surface as errors.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AnalyticsConfig::default());
        }
        Self::load(path)
    }

    /// Persist the configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CoreError::Configuration(e.to_string()))?;
        fs::write(path, content)?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Check that the parameters describe a usable configuration
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("body_battery_weight", self.readiness.body_battery_weight),
            ("sleep_weight", self.readiness.sleep_weight),
            ("hrv_weight", self.readiness.hrv_weight),
            ("stress_weight", self.readiness.stress_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CoreError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if weights.iter().map(|(_, w)| w).sum::<f64>() <= 0.0 {
            return Err(CoreError::Configuration(
                "at least one readiness weight must be positive".to_string(),
            ));
        }

        if self.aggregation.trend_dead_band_pct < Decimal::ZERO {
            return Err(CoreError::Configuration(format!(
                "trend_dead_band_pct must be non-negative, got {}",
                self.aggregation.trend_dead_band_pct
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.readiness.body_battery_weight, 0.40);
        assert_eq!(config.aggregation.trend_dead_band_pct, dec!(2));
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AnalyticsConfig::default();
        config.readiness.hrv_weight = 0.25;
        config.aggregation.trend_dead_band_pct = dec!(3.5);

        config.save(&path).unwrap();
        let loaded = AnalyticsConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = AnalyticsConfig::load_or_default(&path).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "readiness = \"not a table\"").unwrap();

        let result = AnalyticsConfig::load(&path);
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut config = AnalyticsConfig::default();
        config.readiness.sleep_weight = -0.1;

        assert!(matches!(
            config.validate(),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_all_zero_weights() {
        let mut config = AnalyticsConfig::default();
        config.readiness.body_battery_weight = 0.0;
        config.readiness.sleep_weight = 0.0;
        config.readiness.hrv_weight = 0.0;
        config.readiness.stress_weight = 0.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_dead_band() {
        let mut config = AnalyticsConfig::default();
        config.aggregation.trend_dead_band_pct = dec!(-1);

        assert!(config.validate().is_err());
    }
}
