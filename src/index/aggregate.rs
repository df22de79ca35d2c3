//! Bottom-up propagation of document-id sets.
//!
//! Leaves and split points carry the ids deposited during construction;
//! queries want the union over whole subtrees. Aggregation walks a
//! breadth-first ordering in reverse, which visits every child before its
//! parent along tree edges, and unions each node's own ids with its
//! children's aggregated bitmaps.

use crate::error::{Error, Result};
use crate::index::node::Node;
use crate::index::tree::GeneralizedSuffixTree;
use crate::index::types::{NodeId, ROOT};
use roaring::RoaringBitmap;

impl GeneralizedSuffixTree {
    /// Populate every node's aggregated id set.
    ///
    /// Must run after the last `insert` and before `similar`; inserting
    /// again invalidates the result. Safe to call repeatedly.
    pub fn aggregate(&mut self) {
        let _span = tracing::debug_span!("aggregate").entered();

        let mut order: Vec<NodeId> = Vec::with_capacity(self.nodes.len());
        order.push(ROOT);
        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            for eid in self.nodes[id as usize].edges() {
                order.push(self.edges[eid as usize].dest());
            }
            next += 1;
        }

        for &id in order.iter().rev() {
            let mut agg = RoaringBitmap::new();
            for &doc in self.nodes[id as usize].own_ids() {
                agg.insert(doc);
            }
            for eid in self.nodes[id as usize].edges() {
                let child = self.edges[eid as usize].dest();
                agg |= self.nodes[child as usize].aggregated_ids();
            }
            self.nodes[id as usize].set_aggregated(agg);
        }

        self.bfs = Some(order);
        tracing::debug!(nodes = self.nodes.len(), "aggregation complete");
    }

    /// The breadth-first node ordering produced by aggregation, root first.
    /// Intended for debugging and invariant checks.
    pub fn nodes(&self) -> Result<impl Iterator<Item = &Node> + '_> {
        let order = self.bfs.as_ref().ok_or(Error::NotAggregated)?;
        Ok(order.iter().map(move |&id| &self.nodes[id as usize]))
    }

    /// Union of `own_ids` over the subtree rooted at `start`. The slow path
    /// behind `search` while aggregated sets are stale.
    pub(crate) fn collect_subtree_ids(&self, start: NodeId) -> RoaringBitmap {
        let mut ids = RoaringBitmap::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            for &doc in self.nodes[id as usize].own_ids() {
                ids.insert(doc);
            }
            for eid in self.nodes[id as usize].edges() {
                stack.push(self.edges[eid as usize].dest());
            }
        }
        ids
    }
}
