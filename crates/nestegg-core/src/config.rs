//! Engine configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An override file (explicit path, else ~/.local/share/nestegg/config.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Keys missing from the override keep their default values. An explicit
//! path that does not exist is an error; a missing file at the default
//! location just means defaults. Round-up preferences stored in the ledger
//! take precedence over this file.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::roundup::{RoundUpMultiplier, RoundUpSettings};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub horizon_days: u32,
    pub max_daily_spend: Decimal,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            max_daily_spend: Decimal::from(50),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Transactions shown on the dashboard
    pub recent_count: usize,
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_count: 4,
            currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub round_ups: RoundUpSettings,
    pub forecast: ForecastConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Load from `override_path`, else the default override location if it
    /// exists, else the embedded defaults.
    ///
    /// An explicit `override_path` must exist.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let defaults = parse_config(DEFAULT_CONFIG, Config::default())?;

        let path = match override_path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading config override");
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config(&content, defaults)
            }
            None => Ok(defaults),
        }
    }

    /// Parse a TOML document on top of the embedded defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let defaults = parse_config(DEFAULT_CONFIG, Config::default())?;
        parse_config(content, defaults)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nestegg").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    round_ups: Option<RawRoundUps>,
    forecast: Option<RawForecast>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawRoundUps {
    enabled: Option<bool>,
    multiplier: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    horizon_days: Option<u32>,
    max_daily_spend: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    recent_count: Option<usize>,
    currency: Option<String>,
}

fn parse_config(content: &str, base: Config) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = base;

    if let Some(round_ups) = raw.round_ups {
        if let Some(enabled) = round_ups.enabled {
            config.round_ups.enabled = enabled;
        }
        if let Some(multiplier) = round_ups.multiplier {
            config.round_ups.multiplier = RoundUpMultiplier::try_from(multiplier)
                .map_err(|e| Error::Config(e.to_string()))?;
        }
    }

    if let Some(forecast) = raw.forecast {
        if let Some(days) = forecast.horizon_days {
            config.forecast.horizon_days = days;
        }
        if let Some(max) = forecast.max_daily_spend {
            if max < Decimal::ZERO {
                return Err(Error::Config(format!(
                    "forecast.max_daily_spend must not be negative (got {})",
                    max
                )));
            }
            config.forecast.max_daily_spend = max;
        }
    }

    if let Some(display) = raw.display {
        if let Some(count) = display.recent_count {
            config.display.recent_count = count;
        }
        if let Some(currency) = display.currency {
            config.display.currency = currency.to_uppercase();
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_embedded_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.round_ups.enabled);
        assert_eq!(config.round_ups.multiplier, RoundUpMultiplier::One);
        assert_eq!(config.forecast.horizon_days, 30);
        assert_eq!(config.forecast.max_daily_spend, dec!(50));
        assert_eq!(config.display.recent_count, 4);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            r#"
            [round_ups]
            multiplier = 3

            [forecast]
            max_daily_spend = 20.5

            [unknown]
            key = "ignored"
            "#,
        )
        .unwrap();
        assert!(config.round_ups.enabled);
        assert_eq!(config.round_ups.multiplier, RoundUpMultiplier::Three);
        assert_eq!(config.forecast.horizon_days, 30);
        assert_eq!(config.forecast.max_daily_spend, dec!(20.5));
    }

    #[test]
    fn test_invalid_values() {
        let result = Config::from_toml("[round_ups]\nmultiplier = 5\n");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Config::from_toml("[forecast]\nmax_daily_spend = -1\n");
        assert!(matches!(result, Err(Error::Config(_))));

        assert!(Config::from_toml("not = [valid").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\ncurrency = \"eur\"\nrecent_count = 10\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.display.currency, "EUR");
        assert_eq!(config.display.recent_count, 10);

        // A mistyped explicit path is an error, not a silent fallback
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(Error::Config(_))
        ));
    }
}
