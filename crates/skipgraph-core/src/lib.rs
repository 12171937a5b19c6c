//! # Skipgraph Core
//!
//! Indexes concept/predicate extraction output into a search engine and
//! queries the resulting knowledge graph.
//!
//! - [`model`]: extraction inputs (labels grouped by concept or predicate)
//! - [`records`]: lazy generation of flat, indexable [`Record`]s
//! - [`engine`]: the [`GraphEngine`] contract a backend adapter implements
//! - [`GraphQuery`]: the facade that validates calls and forwards them
//!
//! ```rust
//! use skipgraph_core::test_support::MockGraphEngine;
//! use skipgraph_core::{GraphBundle, GraphConfig, GraphQuery, IndexOptions};
//!
//! let engine = MockGraphEngine::new();
//! let config = GraphConfig::new("http://localhost:8983/solr/", "osc-blog", "SOLR", "");
//! let graph = GraphQuery::connect(&config, &engine.binder()).unwrap();
//! assert_eq!(graph.name(), "osc-blog-graph");
//!
//! let ack = graph.index(&GraphBundle::default(), IndexOptions::default()).unwrap();
//! assert_eq!(ack.documents, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
mod graph_query;
pub mod model;
pub mod records;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use graph_query::GraphQuery;

pub use error::{GraphError, GraphResult, RecordError};

pub use model::{ContentType, GraphBundle, Group, GroupCounts, Label, Mention};

pub use records::{build_records, Record, RecordLabel, RecordStream};

pub use engine::{
    CountOptions, EngineBinder, EngineError, EngineResult, EngineTarget, ExploreOptions,
    GraphEngine, GraphOptions, GraphTree, IndexAck, IndexOptions, Suggestion, Summary, TermCount,
};

// Configuration types callers need to build a facade
pub use skipgraph_config::{ConfigError, ConfigLoader, EngineKind, GraphConfig, ResolvedGraphConfig};
