// crates/tradeboard-client/src/config.rs

//! Client configuration.
//!
//! Layered, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `$TRADEBOARD_CONFIG`)
//! 3. environment variables:
//!    - `TRADEBOARD_API_URL`
//!    - `TRADEBOARD_DATASET`
//!    - `TRADEBOARD_GROUP_ORDER` (`chronological` | `first-seen`)
//!    - `TRADEBOARD_THEME`       (`dark` | `light`)
//! 4. command-line flags (applied by `main`)

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tradeboard_core::GroupOrder;

use crate::api::{ApiClient, ApiError};
use crate::network::DataSource;
use crate::theme::ThemeName;

pub const CONFIG_PATH_VAR: &str = "TRADEBOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },

    #[error("no data source configured: set an API URL or a dataset path")]
    NoDataSource,

    #[error("cannot set up the API client: {0}")]
    Http(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the trade API, e.g. `http://localhost:8000/api`.
    pub api_url: Option<String>,
    /// Static JSON or CSV dataset, used when no API URL is set.
    pub dataset: Option<PathBuf>,
    pub group_order: GroupOrder,
    /// Directory CSV exports are written to.
    pub export_dir: PathBuf,
    pub theme: ThemeName,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            dataset: None,
            group_order: GroupOrder::default(),
            export_dir: PathBuf::from("."),
            theme: ThemeName::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Defaults, or the given file, or `$TRADEBOARD_CONFIG`; then env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let from_env = lookup(CONFIG_PATH_VAR).map(PathBuf::from);
        let base = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        base.with_env(lookup)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn with_env<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TRADEBOARD_API_URL")
            .filter(|v| !v.trim().is_empty())
            .or(self.api_url);
        let dataset = lookup("TRADEBOARD_DATASET")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(self.dataset);
        let group_order = read_env_or_default(&lookup, "TRADEBOARD_GROUP_ORDER", self.group_order)?;
        let theme = read_env_or_default(&lookup, "TRADEBOARD_THEME", self.theme)?;

        Ok(Self {
            api_url,
            dataset,
            group_order,
            theme,
            ..self
        })
    }

    /// Pick the data source. The API wins when both are configured.
    pub fn data_source(&self) -> Result<DataSource, ConfigError> {
        if let Some(url) = &self.api_url {
            return Ok(DataSource::Remote(ApiClient::new(url.clone())?));
        }
        if let Some(path) = &self.dataset {
            return Ok(DataSource::Static(path.clone()));
        }
        Err(ConfigError::NoDataSource)
    }
}

fn read_env_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(val) => val.parse::<T>().map_err(|e| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: val.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn toml_then_env_precedence() {
        let file = ClientConfig::from_toml_str(
            r#"
            dataset = "data/stock_market_data.json"
            group_order = "first-seen"
            theme = "light"
            "#,
            Path::new("tradeboard.toml"),
        )
        .unwrap();
        assert_eq!(file.group_order, GroupOrder::FirstSeen);
        assert_eq!(file.export_dir, PathBuf::from("."));

        let merged = file
            .with_env(env(&[
                ("TRADEBOARD_API_URL", "http://localhost:8000/api"),
                ("TRADEBOARD_GROUP_ORDER", "chronological"),
            ]))
            .unwrap();
        assert_eq!(merged.api_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(merged.group_order, GroupOrder::Chronological);
        assert_eq!(merged.theme, ThemeName::Light);
        assert!(merged.dataset.is_some());
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = ClientConfig::default()
            .with_env(env(&[("TRADEBOARD_THEME", "neon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "TRADEBOARD_THEME"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ClientConfig::from_toml_str("colour = \"red\"", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn data_source_requires_something() {
        assert!(matches!(
            ClientConfig::default().data_source(),
            Err(ConfigError::NoDataSource)
        ));

        let both = ClientConfig {
            api_url: Some("http://localhost:8000/api".into()),
            dataset: Some(PathBuf::from("trades.json")),
            ..ClientConfig::default()
        };
        assert!(matches!(both.data_source(), Ok(DataSource::Remote(_))));
    }
}
