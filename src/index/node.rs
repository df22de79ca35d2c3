//! Arena nodes and labeled edges.

use crate::index::edge_map::EdgeMap;
use crate::index::types::{DocId, EdgeId, Label, NodeId};
use roaring::RoaringBitmap;

/// A vertex of the suffix tree.
///
/// The concatenation of edge labels from the root to a node spells a
/// substring of at least one indexed document; `substring_length` caches the
/// byte length of that path. `own_ids` holds the ids deposited here during
/// construction (leaves and split points); `aggregated` is the union over
/// the node's whole subtree, valid only after aggregation.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) edges: EdgeMap,
    pub(crate) suffix: Option<NodeId>,
    pub(crate) source_edge: Option<EdgeId>,
    pub(crate) own_ids: Vec<DocId>,
    pub(crate) aggregated: RoaringBitmap,
    pub(crate) substring_length: u32,
}

impl Node {
    pub(crate) fn new(substring_length: u32) -> Self {
        Self {
            edges: EdgeMap::new(),
            suffix: None,
            source_edge: None,
            own_ids: Vec::new(),
            aggregated: RoaringBitmap::new(),
            substring_length,
        }
    }

    /// Outgoing edge whose label starts with byte `c`, if any
    pub fn edge(&self, c: u8) -> Option<EdgeId> {
        self.edges.get(c)
    }

    pub(crate) fn add_edge(&mut self, c: u8, edge: EdgeId) {
        self.edges.put(c, edge);
    }

    /// Enumerate outgoing edges
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.values()
    }

    /// Suffix link: the node spelling this node's path minus its first byte
    pub fn suffix(&self) -> Option<NodeId> {
        self.suffix
    }

    pub(crate) fn set_suffix(&mut self, node: NodeId) {
        self.suffix = Some(node);
    }

    /// Back-reference to the incoming edge; `None` for the root
    pub fn source_edge(&self) -> Option<EdgeId> {
        self.source_edge
    }

    pub(crate) fn set_source_edge(&mut self, edge: EdgeId) {
        self.source_edge = Some(edge);
    }

    /// Document ids deposited directly at this node, sorted
    pub fn own_ids(&self) -> &[DocId] {
        &self.own_ids
    }

    /// Idempotent insert into `own_ids`
    pub(crate) fn add_own_id(&mut self, id: DocId) {
        if let Err(pos) = self.own_ids.binary_search(&id) {
            self.own_ids.insert(pos, id);
        }
    }

    /// Document ids of this node's entire subtree; empty until aggregation
    pub fn aggregated_ids(&self) -> &RoaringBitmap {
        &self.aggregated
    }

    pub(crate) fn set_aggregated(&mut self, ids: RoaringBitmap) {
        self.aggregated = ids;
    }

    /// Byte length of the path label from the root to this node
    pub fn substring_length(&self) -> u32 {
        self.substring_length
    }

    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }
}

/// A labeled arc between two nodes.
///
/// The destination never changes once the edge exists; the label and source
/// are rewritten when the edge is split.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) label: Label,
    pub(crate) source: NodeId,
    pub(crate) dest: NodeId,
}

impl Edge {
    pub(crate) fn new(label: Label, source: NodeId, dest: NodeId) -> Self {
        Self {
            label,
            source,
            dest,
        }
    }

    /// Label range; resolve to bytes with
    /// [`GeneralizedSuffixTree::label_bytes`](crate::GeneralizedSuffixTree::label_bytes)
    pub fn label(&self) -> Label {
        self.label
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn dest(&self) -> NodeId {
        self.dest
    }
}
