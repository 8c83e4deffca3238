//! Configuration management for Highlight Locator

use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Viewport scale geometry is measured at
    pub scale: f64,
    /// Upper bound for fetching one page's text
    pub page_timeout_secs: u64,
    /// Stop after this many matches (0 = unlimited)
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            page_timeout_secs: 15,
            max_results: 0,
        }
    }
}

impl SearchConfig {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "scale",
                value: self.scale.to_string(),
            });
        }
        if self.page_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_timeout_secs",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Read overrides from `LOCATOR_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SearchConfig::default();

        let search = SearchConfig {
            scale: parse_var("LOCATOR_SCALE")?.unwrap_or(defaults.scale),
            page_timeout_secs: parse_var("LOCATOR_PAGE_TIMEOUT_SECS")?
                .unwrap_or(defaults.page_timeout_secs),
            max_results: parse_var("LOCATOR_MAX_RESULTS")?.unwrap_or(defaults.max_results),
        };
        search.validate()?;

        Ok(Config { search })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.search.scale, 1.0);
        assert_eq!(config.search.page_timeout_secs, 15);
        assert_eq!(config.search.max_results, 0);
        assert!(config.search.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let config = SearchConfig {
            scale: 0.0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key: "scale", .. })
        ));

        let config = SearchConfig {
            scale: f64::NAN,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"search":{"scale":2.0}}"#).unwrap();
        assert_eq!(config.search.scale, 2.0);
        assert_eq!(config.search.page_timeout_secs, 15);
    }
}
