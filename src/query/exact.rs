//! Exact substring lookup.
//!
//! A query matches a document exactly when it spells a root-anchored path in
//! the tree, because every substring of every document is a prefix of some
//! suffix. The descent consumes the query against edge labels and the
//! terminal node's subtree holds exactly the matching documents.

use crate::index::tree::GeneralizedSuffixTree;
use crate::index::types::{NodeId, ROOT};
use roaring::RoaringBitmap;

impl GeneralizedSuffixTree {
    /// The node reached by spelling `query` from the root, or `None` if the
    /// tree contains no such path. The empty query reaches no node.
    pub fn search_node(&self, query: &str) -> Option<NodeId> {
        let q = query.as_bytes();
        let mut node = ROOT;
        let mut consumed = 0;

        while consumed < q.len() {
            let eid = self.node(node).edge(q[consumed])?;
            let edge = self.edge(eid);
            let label = self.label_bytes(edge.label());

            let to_match = label.len().min(q.len() - consumed);
            if label[..to_match] != q[consumed..consumed + to_match] {
                return None;
            }
            if label.len() >= q.len() - consumed {
                // The label covers the rest of the query.
                return Some(edge.dest());
            }
            consumed += to_match;
            node = edge.dest();
        }
        None
    }

    /// Ids of all documents containing `query` as a substring; empty when
    /// nothing matches. The empty query returns the empty set.
    ///
    /// With current aggregated sets this is a bitmap clone; otherwise the
    /// matched subtree is scanned on the fly.
    pub fn search(&self, query: &str) -> RoaringBitmap {
        let Some(node) = self.search_node(query) else {
            return RoaringBitmap::new();
        };
        if self.is_aggregated() {
            self.node(node).aggregated_ids().clone()
        } else {
            self.collect_subtree_ids(node)
        }
    }
}
