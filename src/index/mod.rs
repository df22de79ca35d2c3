//! Tree construction and id aggregation.
//!
//! This module provides the core indexing infrastructure:
//!
//! - [`tree`] - The generalized suffix tree and its on-line builder
//! - [`node`] - Arena nodes and labeled edges
//! - [`edge_map`] - Compact per-node `byte -> edge` transition map
//! - [`aggregate`] - Bottom-up propagation of document-id sets
//! - [`types`] - Ids, label ranges and statistics
//!
//! ## Tree Structure
//!
//! The node graph is an arena: nodes and edges live in flat vectors and
//! reference each other through `u32` ids, which sidesteps the reference
//! cycles that suffix links and parent back-edges would otherwise create.
//! Edge labels are byte ranges into the stored document strings, so
//! construction never copies label text.

pub mod aggregate;
pub mod edge_map;
pub mod node;
pub mod tree;
pub mod types;

// Re-exports for public API
pub use edge_map::EdgeMap;
pub use node::{Edge, Node};
pub use tree::GeneralizedSuffixTree;
pub use types::{DocId, EdgeId, NodeId, TreeStats};
