//! Graph query facade
//!
//! [`GraphQuery`] is the entry point for indexing extraction output and
//! querying the resulting concept/predicate graph. It validates configuration
//! once, at construction, then forwards each call to the bound
//! [`GraphEngine`] after checking its arguments. It holds no query logic of
//! its own and makes exactly one engine call per operation.

use skipgraph_config::{EngineKind, GraphConfig, ResolvedGraphConfig};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::engine::{
    CountOptions, EngineBinder, EngineTarget, ExploreOptions, GraphEngine, GraphOptions,
    GraphTree, IndexAck, IndexOptions, Suggestion, Summary, TermCount,
};
use crate::error::{GraphError, GraphResult};
use crate::model::{ContentType, GraphBundle};
use crate::records::{build_records, Record};

/// Facade over a search engine holding a concept/predicate graph
#[derive(Clone)]
pub struct GraphQuery {
    config: ResolvedGraphConfig,
    engine: Arc<dyn GraphEngine>,
}

impl GraphQuery {
    /// Validate `config` and bind an engine adapter through `binder`
    ///
    /// # Errors
    ///
    /// - [`GraphError::Config`] when the engine is unsupported or not ready,
    ///   or a field is invalid. The binder is not called in that case.
    /// - [`GraphError::Engine`] when the binder fails.
    pub fn connect(config: &GraphConfig, binder: &impl EngineBinder) -> GraphResult<Self> {
        let config = config.resolve()?;
        let target = EngineTarget::from(&config);
        let engine = binder.bind(&target)?;

        info!(
            engine = %config.engine(),
            collection = config.collection(),
            "Graph query facade ready"
        );

        Ok(Self { config, engine })
    }

    /// Build a facade around an already-bound adapter
    pub fn with_engine(config: ResolvedGraphConfig, engine: Arc<dyn GraphEngine>) -> Self {
        Self { config, engine }
    }

    /// Collection kind, always `graph`
    pub fn kind(&self) -> &'static str {
        self.config.kind()
    }

    /// Normalized collection name
    pub fn name(&self) -> &str {
        self.config.collection()
    }

    /// Engine base address
    pub fn host(&self) -> &str {
        self.config.host()
    }

    /// Engine-specific path
    pub fn path(&self) -> &str {
        self.config.path()
    }

    /// Resolved backend
    pub fn engine_kind(&self) -> EngineKind {
        self.config.engine()
    }

    /// Full collection address
    pub fn collection_uri(&self) -> String {
        self.config.collection_uri()
    }

    /// Resolved configuration
    pub fn config(&self) -> &ResolvedGraphConfig {
        &self.config
    }

    /// Index an extraction bundle
    ///
    /// Concept records come first in the batch, predicate records second.
    /// Record generation runs to completion before the engine is called, so a
    /// validation failure sends nothing.
    pub fn index(&self, bundle: &GraphBundle, options: IndexOptions) -> GraphResult<IndexAck> {
        if options.timeout.is_zero() {
            return Err(GraphError::invalid_argument("timeout", "must be greater than zero"));
        }

        let mut records: Vec<Record> = Vec::with_capacity(bundle.label_count());
        for record in build_records(&bundle.concept_groups, ContentType::Concept) {
            records.push(record?);
        }
        for record in build_records(&bundle.predicate_groups, ContentType::Predicate) {
            records.push(record?);
        }

        debug!(
            collection = self.name(),
            documents = records.len(),
            timeout = ?options.timeout,
            "Dispatching index batch"
        );

        Ok(self.engine.index(records, options.timeout)?)
    }

    /// Collections of this facade's kind known to the engine
    pub fn indexes(&self) -> GraphResult<Vec<String>> {
        Ok(self.engine.indexes(self.kind())?)
    }

    /// Compute preferred labels for newly indexed concepts
    ///
    /// Not implemented. Always returns `0` (no labels updated) instead of
    /// failing, so callers can schedule it unconditionally.
    pub fn make_pref_labels(&self) -> usize {
        warn!(collection = self.name(), "make_pref_labels is not implemented; nothing updated");
        0
    }

    /// Concepts appearing alongside both `concept` and `verb`
    pub fn concept_verb_concepts(
        &self,
        concept: &str,
        verb: &str,
        options: CountOptions,
    ) -> GraphResult<Vec<TermCount>> {
        require_term("concept", concept)?;
        require_term("verb", verb)?;
        check_counts(options)?;
        Ok(self.engine.concept_verb_concepts(concept, verb, options)?)
    }

    /// Concepts appearing alongside `verb`
    pub fn concepts_near_verb(
        &self,
        verb: &str,
        options: CountOptions,
    ) -> GraphResult<Vec<TermCount>> {
        require_term("verb", verb)?;
        check_counts(options)?;
        Ok(self.engine.concepts_near_verb(verb, options)?)
    }

    /// Verbs appearing alongside `concept`
    pub fn verbs_near_concept(
        &self,
        concept: &str,
        options: CountOptions,
    ) -> GraphResult<Vec<TermCount>> {
        require_term("concept", concept)?;
        check_counts(options)?;
        Ok(self.engine.verbs_near_concept(concept, options)?)
    }

    /// Concept suggestions for `prefix`; `build` rebuilds the suggester first
    ///
    /// Any prefix is forwarded, including an empty one, so
    /// `suggest_concepts("", true)` can be used just to rebuild.
    pub fn suggest_concepts(&self, prefix: &str, build: bool) -> GraphResult<Vec<Suggestion>> {
        Ok(self.engine.suggest_concepts(prefix, build)?)
    }

    /// Predicate suggestions for `prefix`; `build` rebuilds the suggester first
    ///
    /// Any prefix is forwarded, as for [`GraphQuery::suggest_concepts`].
    pub fn suggest_predicates(&self, prefix: &str, build: bool) -> GraphResult<Vec<Suggestion>> {
        Ok(self.engine.suggest_predicates(prefix, build)?)
    }

    /// Top concepts and predicates, filtered and limited alike
    pub fn summarize(&self, options: CountOptions) -> GraphResult<Summary> {
        check_counts(options)?;
        Ok(self.engine.summarize(options)?)
    }

    /// One-hop subject → predicate → object traversal
    pub fn graph(&self, subject: &str, options: GraphOptions) -> GraphResult<GraphTree> {
        require_term("subject", subject)?;
        require_positive("objects", options.objects)?;
        require_positive("branches", options.branches)?;
        Ok(self.engine.graph(subject, options)?)
    }

    /// Suggest from `term` and walk the graph from there
    ///
    /// Unless `options.quiet` is set, the rendered tree is also emitted as an
    /// `info` event (field `trace`) for whatever subscriber the caller runs.
    pub fn explore(&self, term: &str, options: ExploreOptions) -> GraphResult<GraphTree> {
        require_term("term", term)?;
        require_positive("branches", options.branches)?;

        let tree = self.engine.explore(term, options)?;
        if !options.quiet {
            info!(
                term,
                content_type = %options.content_type,
                branches = tree.branches.len(),
                trace = %tree,
                "Explored graph"
            );
        }
        Ok(tree)
    }
}

impl fmt::Debug for GraphQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphQuery")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn require_term(name: &'static str, value: &str) -> GraphResult<()> {
    if value.trim().is_empty() {
        return Err(GraphError::invalid_argument(name, "must not be blank"));
    }
    Ok(())
}

fn require_positive(name: &'static str, value: usize) -> GraphResult<()> {
    if value == 0 {
        return Err(GraphError::invalid_argument(name, "must be at least 1"));
    }
    Ok(())
}

fn check_counts(options: CountOptions) -> GraphResult<()> {
    require_positive("limit", options.limit)
}
