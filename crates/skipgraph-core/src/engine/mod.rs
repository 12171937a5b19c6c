//! Search engine adapter contract
//!
//! [`GraphEngine`] is the capability set the facade needs from a backend.
//! Concrete bindings (Solr today) live outside this crate and are plugged in
//! through an [`EngineBinder`] when a [`crate::GraphQuery`] is built.
//!
//! # Contract
//!
//! - Every method is a single blocking call; the facade never retries.
//! - Ranked results are bounded by the requested `limit` and filtered by
//!   `mincount`; the facade returns them as-is.
//! - `index` must honor `timeout` as an upper bound and report overruns as
//!   [`EngineError::Timeout`].
//! - Re-indexing a record with an existing `id` overwrites it.

mod error;
mod types;

pub use error::{EngineError, EngineResult};
pub use types::{
    CountOptions, ExploreOptions, GraphOptions, GraphTree, IndexAck, IndexOptions,
    PredicateBranch, Suggestion, Summary, TermCount, DEFAULT_INDEX_TIMEOUT,
};

use skipgraph_config::{EngineKind, ResolvedGraphConfig};
use std::sync::Arc;
use std::time::Duration;

use crate::records::Record;

/// Query and index capabilities of a search engine backend
///
/// Implementations must be `Send + Sync`; the facade shares one adapter
/// across callers.
pub trait GraphEngine: Send + Sync {
    /// Upsert a batch of records
    fn index(&self, records: Vec<Record>, timeout: Duration) -> EngineResult<IndexAck>;

    /// Names of the collections of `kind` known to the engine
    fn indexes(&self, kind: &str) -> EngineResult<Vec<String>>;

    /// Concepts starting with `prefix`; `build` rebuilds the suggester first
    fn suggest_concepts(&self, prefix: &str, build: bool) -> EngineResult<Vec<Suggestion>>;

    /// Predicates starting with `prefix`; `build` rebuilds the suggester first
    fn suggest_predicates(&self, prefix: &str, build: bool) -> EngineResult<Vec<Suggestion>>;

    /// Concepts that co-occur with both `concept` and `verb`
    fn concept_verb_concepts(
        &self,
        concept: &str,
        verb: &str,
        options: CountOptions,
    ) -> EngineResult<Vec<TermCount>>;

    /// Concepts that co-occur with `verb`
    fn concepts_near_verb(&self, verb: &str, options: CountOptions)
        -> EngineResult<Vec<TermCount>>;

    /// Verbs that co-occur with `concept`
    fn verbs_near_concept(
        &self,
        concept: &str,
        options: CountOptions,
    ) -> EngineResult<Vec<TermCount>>;

    /// Top concepts and predicates of the collection
    fn summarize(&self, options: CountOptions) -> EngineResult<Summary>;

    /// One-hop traversal from `subject`
    fn graph(&self, subject: &str, options: GraphOptions) -> EngineResult<GraphTree>;

    /// Suggest from `term`, then traverse from the suggestions
    fn explore(&self, term: &str, options: ExploreOptions) -> EngineResult<GraphTree>;
}

/// Everything an adapter needs to know to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTarget {
    /// Backend to bind
    pub engine: EngineKind,
    /// Base address of the engine
    pub host: String,
    /// Normalized collection name
    pub collection: String,
    /// Collection kind (`graph`)
    pub kind: &'static str,
    /// Engine-specific path
    pub path: String,
}

impl From<&ResolvedGraphConfig> for EngineTarget {
    fn from(config: &ResolvedGraphConfig) -> Self {
        Self {
            engine: config.engine(),
            host: config.host().to_string(),
            collection: config.collection().to_string(),
            kind: config.kind(),
            path: config.path().to_string(),
        }
    }
}

/// Produces a [`GraphEngine`] for a resolved target
///
/// Implemented for closures, so a binder can be as small as
/// `|target: &EngineTarget| Ok(Arc::new(MyEngine::connect(target)?) as Arc<dyn GraphEngine>)`.
pub trait EngineBinder {
    /// Bind an adapter to `target`
    fn bind(&self, target: &EngineTarget) -> EngineResult<Arc<dyn GraphEngine>>;
}

impl<F> EngineBinder for F
where
    F: Fn(&EngineTarget) -> EngineResult<Arc<dyn GraphEngine>>,
{
    fn bind(&self, target: &EngineTarget) -> EngineResult<Arc<dyn GraphEngine>> {
        self(target)
    }
}
