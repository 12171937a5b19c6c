//! # Skipgraph Configuration Library
//!
//! Loads and validates the settings a graph query facade is built from:
//! the search engine host, the collection name, the engine name and the
//! engine-specific path.
//!
//! ## Features
//!
//! - TOML and JSON loading
//! - Case-insensitive engine selection resolved once into [`EngineKind`]
//! - Idempotent `-graph` collection naming
//! - Environment overrides through an injectable lookup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skipgraph_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("skipgraph.toml")?;
//!     let resolved = config.resolve()?;
//!     println!("indexing into {}", resolved.collection_uri());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod error;
mod graph;
mod loader;

pub use engine::*;
pub use error::*;
pub use graph::*;
pub use loader::*;
