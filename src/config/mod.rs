//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::data::TableSources;
use crate::output::Format;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "offer-search.toml";

/// Prefix for environment variable overrides, e.g. `OFFER_SEARCH_DATA__OFFERS`.
pub const ENV_PREFIX: &str = "OFFER_SEARCH_";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input table locations.
    pub data: TableSources,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `OFFER_SEARCH_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from `dir`, looking for `offer-search.toml`.
    ///
    /// A missing file is silently skipped (defaults are used).
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.as_ref().join(CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        brands: Option<PathBuf>,
        categories: Option<PathBuf>,
        offers: Option<PathBuf>,
        format: Option<Format>,
    ) -> Self {
        if let Some(path) = brands {
            self.data.brands = path;
        }
        if let Some(path) = categories {
            self.data.categories = path;
        }
        if let Some(path) = offers {
            self.data.offers = path;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: Format,
}
