//! File-based configuration loading

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::graph::GraphConfig;

/// Supported on-disk configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml` files
    #[cfg(feature = "toml")]
    Toml,
    /// `.json` files
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            #[cfg(feature = "toml")]
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(ConfigError::invalid_value(
                format!("config file {}", path.display()),
                format!("unsupported extension {other:?}"),
            )),
        }
    }

    /// Parse configuration text in this format
    pub fn parse(self, contents: &str) -> ConfigResult<GraphConfig> {
        match self {
            #[cfg(feature = "toml")]
            Self::Toml => GraphConfig::from_toml_str(contents),
            Self::Json => GraphConfig::from_json_str(contents),
        }
    }
}

/// Loads [`GraphConfig`] values from disk
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read and parse a configuration file, choosing the format by extension
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<GraphConfig> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = format.parse(&contents)?;
        info!("Loaded graph configuration from {}", path.display());
        Ok(config)
    }

    /// Load a configuration file, then apply `SKIPGRAPH_*` environment overrides
    pub fn load_with_env(path: impl AsRef<Path>) -> ConfigResult<GraphConfig> {
        Ok(Self::load_from_file(path)?.with_process_env())
    }
}
