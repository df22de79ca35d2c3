//! # sufidx - Generalized Suffix Tree Index
//!
//! sufidx indexes a set of strings (documents) in a generalized suffix tree
//! built on-line with a multi-string variant of Ukkonen's algorithm. Once
//! built, the tree answers two kinds of queries in time proportional to the
//! query rather than the corpus:
//!
//! - **Exact substring lookup**: which documents contain `q` as a substring?
//! - **Approximate similarity**: which documents `s` satisfy
//!   `2 * LCSubstr(q, s) / (|q| + |s|) > ratio`?
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Tree construction and id aggregation (nodes, edges, builder)
//! - [`query`] - Exact substring descent and suffix-link similarity walk
//! - [`utils`] - String normalization and the naive LCSubstr oracle
//!
//! ## Quick Start
//!
//! ```
//! use sufidx::GeneralizedSuffixTree;
//!
//! let mut tree = GeneralizedSuffixTree::new();
//! tree.insert("cacao", 0)?;
//! tree.insert("cacophony", 1)?;
//! tree.aggregate();
//!
//! let hits = tree.search("cac");
//! assert!(hits.contains(0) && hits.contains(1));
//!
//! let close = tree.similar("cacao", 0.3)?;
//! assert!(close.contains(0));
//! # Ok::<(), sufidx::Error>(())
//! ```
//!
//! ## Usage Notes
//!
//! Documents are matched on their UTF-8 byte representation; all lengths in
//! the similarity formula are byte lengths. Document ids must be inserted in
//! non-decreasing order. `similar` requires [`aggregate`] to have run since
//! the last insert; `search` works either way (it falls back to an
//! on-the-fly subtree scan while aggregation is stale).
//!
//! [`aggregate`]: GeneralizedSuffixTree::aggregate

pub mod error;
pub mod index;
pub mod query;
pub mod utils;

pub use error::{Error, Result};
pub use index::tree::GeneralizedSuffixTree;
pub use index::types::{DocId, EdgeId, NodeId, TreeStats};
