//! Search engine selection
//!
//! Engine names arrive as free-form strings. They are classified exactly once,
//! at configuration time, into [`EngineSelection`]; everything downstream works
//! with the resolved [`EngineKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, ConfigResult};

const SOLR_ALIASES: &[&str] = &["solr"];
const ELASTICSEARCH_ALIASES: &[&str] = &["elasticsearch", "elastic", "es"];

/// A search engine backend with a usable binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Apache Solr
    Solr,
}

/// A backend name that is reserved but has no binding yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedEngine {
    /// Elasticsearch (`elasticsearch`, `elastic`, `es`)
    Elasticsearch,
}

/// Classification of a configured engine name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSelection {
    /// The name resolves to a backend that can be bound
    Supported(EngineKind),
    /// The name belongs to a backend that is not ready yet
    Reserved(ReservedEngine),
    /// The name matches nothing known
    Unsupported(String),
}

impl EngineSelection {
    /// Classify an engine name, ignoring case and surrounding whitespace
    pub fn classify(engine_name: &str) -> Self {
        let normalized = engine_name.trim().to_lowercase();

        if SOLR_ALIASES.contains(&normalized.as_str()) {
            Self::Supported(EngineKind::Solr)
        } else if ELASTICSEARCH_ALIASES.contains(&normalized.as_str()) {
            Self::Reserved(ReservedEngine::Elasticsearch)
        } else {
            Self::Unsupported(engine_name.to_string())
        }
    }

    /// Turn the classification into a usable engine or a fatal configuration error
    pub fn into_result(self) -> ConfigResult<EngineKind> {
        match self {
            Self::Supported(kind) => Ok(kind),
            Self::Reserved(reserved) => Err(ConfigError::EngineNotReady(reserved)),
            Self::Unsupported(name) => Err(ConfigError::UnsupportedEngine(name)),
        }
    }
}

impl EngineKind {
    /// Resolve an engine name into a supported backend
    ///
    /// # Errors
    ///
    /// [`ConfigError::EngineNotReady`] for reserved aliases and
    /// [`ConfigError::UnsupportedEngine`] for anything else.
    pub fn resolve(engine_name: &str) -> ConfigResult<Self> {
        EngineSelection::classify(engine_name).into_result()
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solr => "solr",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReservedEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elasticsearch => f.write_str("Elasticsearch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("solr" ; "lowercase")]
    #[test_case("SOLR" ; "uppercase")]
    #[test_case("SoLr" ; "mixed case")]
    #[test_case("  Solr " ; "padded")]
    fn solr_resolves_in_any_casing(name: &str) {
        assert_eq!(EngineKind::resolve(name).unwrap(), EngineKind::Solr);
    }

    #[test_case("elasticsearch")]
    #[test_case("Elastic")]
    #[test_case("ES")]
    fn elastic_aliases_are_not_ready(name: &str) {
        let err = EngineKind::resolve(name).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EngineNotReady(ReservedEngine::Elasticsearch)
        ));
        assert!(err.is_engine_selection());
    }

    #[test_case("" ; "empty")]
    #[test_case("lucene" ; "unknown engine")]
    #[test_case("solr7" ; "near miss")]
    fn other_names_are_unsupported(name: &str) {
        match EngineKind::resolve(name) {
            Err(ConfigError::UnsupportedEngine(reported)) => assert_eq!(reported, name),
            other => panic!("expected unsupported engine, got {other:?}"),
        }
    }

    #[test]
    fn not_ready_message_names_the_backend() {
        let err = EngineKind::resolve("es").unwrap_err();
        assert_eq!(err.to_string(), "Search engine Elasticsearch is not ready yet");
    }

    fn random_casing(name: &'static str) -> impl Strategy<Value = String> {
        proptest::collection::vec(any::<bool>(), name.len()).prop_map(move |upper| {
            name.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn any_casing_of_solr_is_supported(name in random_casing("solr")) {
            prop_assert_eq!(EngineSelection::classify(&name), EngineSelection::Supported(EngineKind::Solr));
        }

        #[test]
        fn any_casing_of_elastic_is_reserved(name in random_casing("elastic")) {
            prop_assert_eq!(
                EngineSelection::classify(&name),
                EngineSelection::Reserved(ReservedEngine::Elasticsearch)
            );
        }

        #[test]
        fn classification_is_total(name in "[a-zA-Z0-9 _-]{0,16}") {
            let lowered = name.trim().to_lowercase();
            let expected = match lowered.as_str() {
                "solr" => EngineSelection::Supported(EngineKind::Solr),
                "elasticsearch" | "elastic" | "es" => {
                    EngineSelection::Reserved(ReservedEngine::Elasticsearch)
                }
                _ => EngineSelection::Unsupported(name.clone()),
            };
            prop_assert_eq!(EngineSelection::classify(&name), expected);
        }
    }
}
