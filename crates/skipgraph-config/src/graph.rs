//! Graph facade configuration
//!
//! A [`GraphConfig`] is the raw, user-supplied set of four keys. Calling
//! [`GraphConfig::resolve`] validates it and produces the immutable
//! [`ResolvedGraphConfig`] that a facade is built from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

use crate::engine::EngineKind;
use crate::error::{ConfigError, ConfigResult};

/// Collection kind served by the graph facade
pub const GRAPH_KIND: &str = "graph";

/// Suffix every graph collection name carries
pub const GRAPH_SUFFIX: &str = "-graph";

/// Keys every configuration source must provide
pub const REQUIRED_KEYS: [&str; 4] = ["host", "name", "engine_name", "path"];

/// Overrides [`GraphConfig::host`] in [`GraphConfig::apply_env_overrides`]
pub const ENV_HOST: &str = "SKIPGRAPH_HOST";
/// Overrides [`GraphConfig::name`]
pub const ENV_NAME: &str = "SKIPGRAPH_NAME";
/// Overrides [`GraphConfig::engine_name`]
pub const ENV_ENGINE: &str = "SKIPGRAPH_ENGINE";
/// Overrides [`GraphConfig::path`]
pub const ENV_PATH: &str = "SKIPGRAPH_PATH";

/// Raw graph facade configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Base address of the search engine, e.g. `http://localhost:8983/solr/`
    pub host: String,
    /// Collection (core) name; `-graph` is appended when missing
    pub name: String,
    /// Engine name, matched case-insensitively
    pub engine_name: String,
    /// Engine-specific filesystem path (config sets, schema files)
    pub path: String,
}

impl GraphConfig {
    /// Build a configuration from its four parts
    pub fn new(
        host: impl Into<String>,
        name: impl Into<String>,
        engine_name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            name: name.into(),
            engine_name: engine_name.into(),
            path: path.into(),
        }
    }

    /// Build a configuration from a loosely-typed key/value object
    ///
    /// Every key in [`REQUIRED_KEYS`] must be present and hold a string.
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        let table = value
            .as_object()
            .ok_or_else(|| ConfigError::invalid_value("configuration", "expected a table of keys"))?;

        let field = |key: &str| -> ConfigResult<String> {
            match table.get(key) {
                None | Some(Value::Null) => Err(ConfigError::missing_key(key)),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(other) => Err(ConfigError::invalid_value(
                    key,
                    format!("expected a string, found {other}"),
                )),
            }
        };

        Ok(Self {
            host: field("host")?,
            name: field("name")?,
            engine_name: field("engine_name")?,
            path: field("path")?,
        })
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(contents: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// Parse a TOML configuration document
    #[cfg(feature = "toml")]
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let value: Value = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// Replace fields with values found through `lookup`
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut String); 4] = [
            (ENV_HOST, &mut self.host),
            (ENV_NAME, &mut self.name),
            (ENV_ENGINE, &mut self.engine_name),
            (ENV_PATH, &mut self.path),
        ];

        for (var, slot) in targets {
            if let Some(value) = lookup(var) {
                debug!(var, "Overriding graph config from environment");
                *slot = value;
            }
        }
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(mut self) -> Self {
        self.apply_env_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Validate and resolve the configuration
    ///
    /// Steps run in a fixed order: the engine name is resolved first, then the
    /// remaining fields are checked, then the collection name is normalized.
    pub fn resolve(&self) -> ConfigResult<ResolvedGraphConfig> {
        let engine = EngineKind::resolve(&self.engine_name)?;

        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid_value("host", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_value("name", "must not be empty"));
        }

        let collection = normalize_collection_name(&self.name).into_owned();
        debug!(%engine, %collection, "Resolved graph configuration");

        Ok(ResolvedGraphConfig {
            engine,
            host: self.host.clone(),
            collection,
            path: self.path.clone(),
        })
    }
}

/// Append [`GRAPH_SUFFIX`] unless the name already ends with it
pub fn normalize_collection_name(name: &str) -> Cow<'_, str> {
    if name.ends_with(GRAPH_SUFFIX) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}{GRAPH_SUFFIX}"))
    }
}

/// Validated configuration with a resolved engine and normalized collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGraphConfig {
    engine: EngineKind,
    host: String,
    collection: String,
    path: String,
}

impl ResolvedGraphConfig {
    /// The resolved backend
    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    /// Base address of the search engine
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Collection name, always ending in [`GRAPH_SUFFIX`]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Engine-specific path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Collection kind, always [`GRAPH_KIND`]
    pub fn kind(&self) -> &'static str {
        GRAPH_KIND
    }

    /// Full address of the collection (`host` joined with `collection`)
    pub fn collection_uri(&self) -> String {
        if self.host.ends_with('/') {
            format!("{}{}", self.host, self.collection)
        } else {
            format!("{}/{}", self.host, self.collection)
        }
    }
}
