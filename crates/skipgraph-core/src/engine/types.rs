//! Request options and result shapes shared by the facade and engine adapters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::model::ContentType;

/// Default upper bound an adapter may spend indexing one batch
pub const DEFAULT_INDEX_TIMEOUT: Duration = Duration::from_millis(10_000);

/// A term with its co-occurrence or facet count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    /// The term
    pub term: String,
    /// How often it occurred
    pub count: u64,
}

impl TermCount {
    /// Create a term count
    pub fn new(term: impl Into<String>, count: u64) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

/// One autosuggest hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggested term
    pub term: String,
    /// Suggester weight; higher ranks first
    pub weight: u64,
}

impl Suggestion {
    /// Create a suggestion
    pub fn new(term: impl Into<String>, weight: u64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// Ranked concepts and predicates of a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Most frequent concepts
    pub concepts: Vec<TermCount>,
    /// Most frequent predicates
    pub predicates: Vec<TermCount>,
}

impl Summary {
    /// Split into `(concepts, predicates)`
    pub fn into_parts(self) -> (Vec<TermCount>, Vec<TermCount>) {
        (self.concepts, self.predicates)
    }
}

/// One predicate hanging off a subject, with its objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateBranch {
    /// The predicate
    pub predicate: String,
    /// Occurrences of subject + predicate
    pub count: u64,
    /// Objects reached through this predicate
    pub objects: Vec<TermCount>,
}

/// One-hop subject → predicate → object traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTree {
    /// Root of the traversal
    pub subject: String,
    /// Predicates of the subject, each with its objects
    pub branches: Vec<PredicateBranch>,
}

impl GraphTree {
    /// A traversal with no branches
    pub fn leaf(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            branches: Vec::new(),
        }
    }

    /// Number of object nodes across all branches
    pub fn object_count(&self) -> usize {
        self.branches.iter().map(|b| b.objects.len()).sum()
    }
}

impl fmt::Display for GraphTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)?;
        for branch in &self.branches {
            write!(f, "\n  {} ({})", branch.predicate, branch.count)?;
            for object in &branch.objects {
                write!(f, "\n    -> {} ({})", object.term, object.count)?;
            }
        }
        Ok(())
    }
}

/// Acknowledgment returned by an adapter after indexing a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAck {
    /// Collection the batch went into
    pub collection: String,
    /// Documents accepted
    pub documents: usize,
    /// Backend status text, if any
    pub status: Option<String>,
}

/// Options for `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Upper bound passed through to the adapter
    pub timeout: Duration,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_INDEX_TIMEOUT,
        }
    }
}

/// Filtering for count-ranked lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountOptions {
    /// Minimum count a term needs to be returned
    pub mincount: u64,
    /// Maximum number of terms returned
    pub limit: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            mincount: 1,
            limit: 100,
        }
    }
}

/// Fan-out for `graph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Objects per predicate
    pub objects: usize,
    /// Predicates per subject
    pub branches: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            objects: 5,
            branches: 10,
        }
    }
}

/// Options for `explore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreOptions {
    /// Which suggester the term is looked up in
    pub content_type: ContentType,
    /// Rebuild the suggester before looking up
    pub build: bool,
    /// Suppress the human-readable trace
    pub quiet: bool,
    /// Predicates per subject
    pub branches: usize,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            content_type: ContentType::Concept,
            build: false,
            quiet: false,
            branches: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        assert_eq!(IndexOptions::default().timeout, Duration::from_secs(10));
        assert_eq!(CountOptions::default(), CountOptions { mincount: 1, limit: 100 });
        assert_eq!(GraphOptions::default(), GraphOptions { objects: 5, branches: 10 });

        let explore = ExploreOptions::default();
        assert_eq!(explore.content_type, ContentType::Concept);
        assert!(!explore.build);
        assert!(!explore.quiet);
        assert_eq!(explore.branches, 10);
    }

    #[test]
    fn graph_tree_renders_as_indented_trace() {
        let tree = GraphTree {
            subject: "cat".into(),
            branches: vec![
                PredicateBranch {
                    predicate: "chase".into(),
                    count: 4,
                    objects: vec![TermCount::new("mouse", 3), TermCount::new("bird", 1)],
                },
                PredicateBranch {
                    predicate: "eat".into(),
                    count: 2,
                    objects: vec![],
                },
            ],
        };

        assert_eq!(
            tree.to_string(),
            "cat\n  chase (4)\n    -> mouse (3)\n    -> bird (1)\n  eat (2)"
        );
        assert_eq!(tree.object_count(), 2);
    }

    #[test]
    fn summary_splits_into_parts() {
        let summary = Summary {
            concepts: vec![TermCount::new("cat", 9)],
            predicates: vec![TermCount::new("chase", 4)],
        };
        let (concepts, predicates) = summary.into_parts();
        assert_eq!(concepts[0].term, "cat");
        assert_eq!(predicates[0].term, "chase");
    }
}
