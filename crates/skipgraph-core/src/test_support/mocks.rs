//! Mock engine adapter for testing
//!
//! [`MockGraphEngine`] is an in-memory [`GraphEngine`] that:
//!
//! - **Records** every call it receives, in order
//! - **Returns** canned results configured up front
//! - **Fails** on demand with a chosen [`EngineError`]
//! - **Binds** itself through [`MockGraphEngine::binder`], remembering each target
//!
//! # Examples
//!
//! ```rust
//! use skipgraph_config::GraphConfig;
//! use skipgraph_core::engine::{CountOptions, TermCount};
//! use skipgraph_core::test_support::{EngineCall, MockGraphEngine};
//! use skipgraph_core::GraphQuery;
//!
//! let engine = MockGraphEngine::new().with_term_counts(vec![TermCount::new("mouse", 3)]);
//! let config = GraphConfig::new("http://localhost:8983/solr/", "blog", "solr", "");
//! let graph = GraphQuery::connect(&config, &engine.binder()).unwrap();
//!
//! let near = graph.concepts_near_verb("chase", CountOptions::default()).unwrap();
//! assert_eq!(near[0].term, "mouse");
//! assert!(matches!(engine.calls()[0], EngineCall::ConceptsNearVerb { .. }));
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::engine::{
    CountOptions, EngineBinder, EngineError, EngineResult, EngineTarget, ExploreOptions,
    GraphEngine, GraphOptions, GraphTree, IndexAck, Suggestion, Summary, TermCount,
};
use crate::records::Record;

/// A call received by [`MockGraphEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    /// `index`
    Index {
        /// Batch as received
        records: Vec<Record>,
        /// Timeout as received
        timeout: Duration,
    },
    /// `indexes`
    Indexes {
        /// Requested kind
        kind: String,
    },
    /// `suggest_concepts`
    SuggestConcepts {
        /// Prefix
        prefix: String,
        /// Rebuild flag
        build: bool,
    },
    /// `suggest_predicates`
    SuggestPredicates {
        /// Prefix
        prefix: String,
        /// Rebuild flag
        build: bool,
    },
    /// `concept_verb_concepts`
    ConceptVerbConcepts {
        /// Concept
        concept: String,
        /// Verb
        verb: String,
        /// Options
        options: CountOptions,
    },
    /// `concepts_near_verb`
    ConceptsNearVerb {
        /// Verb
        verb: String,
        /// Options
        options: CountOptions,
    },
    /// `verbs_near_concept`
    VerbsNearConcept {
        /// Concept
        concept: String,
        /// Options
        options: CountOptions,
    },
    /// `summarize`
    Summarize {
        /// Options
        options: CountOptions,
    },
    /// `graph`
    Graph {
        /// Subject
        subject: String,
        /// Options
        options: GraphOptions,
    },
    /// `explore`
    Explore {
        /// Term
        term: String,
        /// Options
        options: ExploreOptions,
    },
}

#[derive(Debug, Default)]
struct MockEngineState {
    calls: Vec<EngineCall>,
    targets: Vec<EngineTarget>,
    collection: String,
    indexes: Vec<String>,
    term_counts: Vec<TermCount>,
    suggestions: Vec<Suggestion>,
    summary: Summary,
    tree: Option<GraphTree>,
    failure: Option<EngineError>,
}

/// Recording, configurable [`GraphEngine`]
///
/// Clones share state, so a test can keep one handle while the facade owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockGraphEngine {
    state: Arc<Mutex<MockEngineState>>,
}

impl MockGraphEngine {
    /// Create a mock with empty results
    pub fn new() -> Self {
        Self::default()
    }

    /// Collections returned by `indexes`
    pub fn with_indexes(self, indexes: Vec<String>) -> Self {
        self.state.lock().unwrap().indexes = indexes;
        self
    }

    /// Result of every co-occurrence lookup
    pub fn with_term_counts(self, counts: Vec<TermCount>) -> Self {
        self.state.lock().unwrap().term_counts = counts;
        self
    }

    /// Result of both suggest calls
    pub fn with_suggestions(self, suggestions: Vec<Suggestion>) -> Self {
        self.state.lock().unwrap().suggestions = suggestions;
        self
    }

    /// Result of `summarize`
    pub fn with_summary(self, summary: Summary) -> Self {
        self.state.lock().unwrap().summary = summary;
        self
    }

    /// Result of `graph` and `explore`; defaults to a leaf on the requested term
    pub fn with_tree(self, tree: GraphTree) -> Self {
        self.state.lock().unwrap().tree = Some(tree);
        self
    }

    /// Make every subsequent call fail with `err` (the call is still recorded)
    pub fn fail_with(&self, err: EngineError) {
        self.state.lock().unwrap().failure = Some(err);
    }

    /// Stop injecting failures
    pub fn clear_failure(&self) {
        self.state.lock().unwrap().failure = None;
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Every record received through `index`, in order
    pub fn indexed_records(&self) -> Vec<Record> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Index { records, .. } => Some(records.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Targets this mock was bound to through [`MockGraphEngine::binder`]
    pub fn bound_targets(&self) -> Vec<EngineTarget> {
        self.state.lock().unwrap().targets.clone()
    }

    /// A binder that hands out this mock and remembers the target
    pub fn binder(&self) -> impl EngineBinder + '_ {
        move |target: &EngineTarget| -> EngineResult<Arc<dyn GraphEngine>> {
            let mut state = self.state.lock().unwrap();
            state.targets.push(target.clone());
            state.collection = target.collection.clone();
            Ok(Arc::new(self.clone()))
        }
    }

    fn record<T>(
        &self,
        call: EngineCall,
        respond: impl FnOnce(&MockEngineState) -> T,
    ) -> EngineResult<T> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(respond(&state)),
        }
    }

    fn tree_for(state: &MockEngineState, subject: &str) -> GraphTree {
        state
            .tree
            .clone()
            .unwrap_or_else(|| GraphTree::leaf(subject))
    }
}

impl GraphEngine for MockGraphEngine {
    fn index(&self, records: Vec<Record>, timeout: Duration) -> EngineResult<IndexAck> {
        let documents = records.len();
        self.record(EngineCall::Index { records, timeout }, |state| IndexAck {
            collection: state.collection.clone(),
            documents,
            status: Some("OK".to_string()),
        })
    }

    fn indexes(&self, kind: &str) -> EngineResult<Vec<String>> {
        self.record(
            EngineCall::Indexes {
                kind: kind.to_string(),
            },
            |state| state.indexes.clone(),
        )
    }

    fn suggest_concepts(&self, prefix: &str, build: bool) -> EngineResult<Vec<Suggestion>> {
        self.record(
            EngineCall::SuggestConcepts {
                prefix: prefix.to_string(),
                build,
            },
            |state| state.suggestions.clone(),
        )
    }

    fn suggest_predicates(&self, prefix: &str, build: bool) -> EngineResult<Vec<Suggestion>> {
        self.record(
            EngineCall::SuggestPredicates {
                prefix: prefix.to_string(),
                build,
            },
            |state| state.suggestions.clone(),
        )
    }

    fn concept_verb_concepts(
        &self,
        concept: &str,
        verb: &str,
        options: CountOptions,
    ) -> EngineResult<Vec<TermCount>> {
        self.record(
            EngineCall::ConceptVerbConcepts {
                concept: concept.to_string(),
                verb: verb.to_string(),
                options,
            },
            |state| state.term_counts.clone(),
        )
    }

    fn concepts_near_verb(
        &self,
        verb: &str,
        options: CountOptions,
    ) -> EngineResult<Vec<TermCount>> {
        self.record(
            EngineCall::ConceptsNearVerb {
                verb: verb.to_string(),
                options,
            },
            |state| state.term_counts.clone(),
        )
    }

    fn verbs_near_concept(
        &self,
        concept: &str,
        options: CountOptions,
    ) -> EngineResult<Vec<TermCount>> {
        self.record(
            EngineCall::VerbsNearConcept {
                concept: concept.to_string(),
                options,
            },
            |state| state.term_counts.clone(),
        )
    }

    fn summarize(&self, options: CountOptions) -> EngineResult<Summary> {
        self.record(EngineCall::Summarize { options }, |state| {
            state.summary.clone()
        })
    }

    fn graph(&self, subject: &str, options: GraphOptions) -> EngineResult<GraphTree> {
        self.record(
            EngineCall::Graph {
                subject: subject.to_string(),
                options,
            },
            |state| Self::tree_for(state, subject),
        )
    }

    fn explore(&self, term: &str, options: ExploreOptions) -> EngineResult<GraphTree> {
        self.record(
            EngineCall::Explore {
                term: term.to_string(),
                options,
            },
            |state| Self::tree_for(state, term),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_injection_still_records_calls() {
        let engine = MockGraphEngine::new();
        engine.fail_with(EngineError::connection("down"));

        assert_eq!(
            engine.indexes("graph"),
            Err(EngineError::connection("down"))
        );
        assert_eq!(engine.call_count(), 1);

        engine.clear_failure();
        assert_eq!(engine.indexes("graph"), Ok(vec![]));
    }

    #[test]
    fn clones_share_recorded_calls() {
        let engine = MockGraphEngine::new();
        let handle = engine.clone();
        engine.summarize(CountOptions::default()).unwrap();
        assert_eq!(handle.call_count(), 1);
    }

    #[test]
    fn graph_defaults_to_leaf_tree() {
        let engine = MockGraphEngine::new();
        let tree = engine.graph("cat", GraphOptions::default()).unwrap();
        assert_eq!(tree, GraphTree::leaf("cat"));
    }
}
