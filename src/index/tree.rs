//! The generalized suffix tree and its on-line builder.
//!
//! Construction follows Ukkonen's on-line algorithm, generalized to index
//! many strings in one tree. The generalization changes one thing that the
//! single-string algorithm takes for granted: when the suffix-link walk
//! lands on a node, the transition it is about to create may already exist,
//! built by an earlier document. `update` therefore re-uses the existing
//! destination instead of unconditionally growing a fresh leaf.
//!
//! Document ids must arrive in non-decreasing order. Ids may repeat; a
//! repeated id extends the posting of the earlier one.

use crate::error::{Error, Result};
use crate::index::node::{Edge, Node};
use crate::index::types::{DocId, EdgeId, Label, NodeId, Span, TreeStats, ROOT};
use ahash::AHashMap;

/// A generalized suffix tree over a set of documents.
///
/// `insert` grows the tree one document at a time; `aggregate` materializes
/// per-node document-id sets bottom-up; `search` and `similar` query the
/// result. Nodes and edges live in flat arenas addressed by `u32` ids, so
/// the suffix links and parent back-edges that would otherwise form
/// reference cycles are plain indices.
#[derive(Debug, Clone)]
pub struct GeneralizedSuffixTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    /// Every inserted string, in insertion order. Edge labels point here.
    pub(crate) texts: Vec<Box<str>>,
    /// Document table: id to the latest text inserted under that id
    pub(crate) documents: AHashMap<DocId, u32>,
    /// Highest id inserted so far
    pub(crate) last: DocId,
    /// The most recently extended leaf of the current insertion
    pub(crate) active_leaf: NodeId,
    /// Breadth-first node ordering produced by aggregation; `None` while
    /// aggregated id sets are stale
    pub(crate) bfs: Option<Vec<NodeId>>,
}

impl Default for GeneralizedSuffixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneralizedSuffixTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0)],
            edges: Vec::new(),
            texts: Vec::new(),
            documents: AHashMap::new(),
            last: 0,
            active_leaf: ROOT,
            bfs: None,
        }
    }

    /// Index `key` under the document id `id`.
    ///
    /// Ids must be non-decreasing across calls; an id smaller than the last
    /// inserted one fails with [`Error::IdOrdering`]. Inserting invalidates
    /// any previously aggregated id sets.
    pub fn insert(&mut self, key: &str, id: DocId) -> Result<()> {
        if id < self.last {
            return Err(Error::IdOrdering {
                id,
                last: self.last,
            });
        }
        self.last = id;
        assert!(
            key.len() < u32::MAX as usize,
            "document length must fit in 32 bits"
        );

        let text = self.texts.len() as u32;
        self.texts.push(key.into());
        self.documents.insert(id, text);
        self.bfs = None;
        self.active_leaf = ROOT;

        let bytes = key.as_bytes();
        let mut node = ROOT;
        let mut part = Span::empty();
        for i in 0..bytes.len() {
            // Extend the processed prefix by one byte, then add every
            // transition that byte induces.
            part.end = (i + 1) as u32;
            let rest = Span {
                start: i as u32,
                end: bytes.len() as u32,
            };
            let (n, p) = self.update(node, part, rest, id, text, bytes);
            let (n, p) = self.canonize(n, p, bytes);
            node = n;
            part = p;
        }

        // Close the leaf suffix-link chain of this insertion.
        let leaf = self.active_leaf;
        if self.nodes[leaf as usize].suffix().is_none() && leaf != ROOT && leaf != node {
            self.nodes[leaf as usize].set_suffix(node);
        }

        tracing::debug!(doc = id, bytes = bytes.len(), "document indexed");
        Ok(())
    }

    /// One step of the construction loop: make sure the tree contains every
    /// suffix of the prefix processed so far, extended by the newest byte
    /// (the last byte of `part`).
    ///
    /// Returns the reference pair for the string added so far: the deepest
    /// node whose path is a prefix of it, plus the remainder that must be
    /// spelled below that node.
    fn update(
        &mut self,
        node: NodeId,
        part: Span,
        rest: Span,
        id: DocId,
        text: u32,
        key: &[u8],
    ) -> (NodeId, Span) {
        let new_byte = key[(part.end - 1) as usize];
        let mut node = node;
        let mut part = part;
        let mut oldroot = ROOT;

        let (mut endpoint, mut r) =
            self.test_and_split(node, part.without_last(), new_byte, rest, id, text, key);

        while !endpoint {
            let leaf = match self.nodes[r as usize].edge(new_byte) {
                // An earlier document already built this transition; re-use
                // its destination instead of growing a new leaf.
                Some(eid) => self.edges[eid as usize].dest,
                None => {
                    let depth = self.nodes[r as usize].substring_length + rest.len();
                    let leaf = self.new_node(depth);
                    self.nodes[leaf as usize].add_own_id(id);
                    let eid = self.new_edge(Label::new(text, rest.start, rest.end), r, leaf);
                    self.nodes[leaf as usize].set_source_edge(eid);
                    self.nodes[r as usize].add_edge(new_byte, eid);
                    leaf
                }
            };

            // Chain suffix links between the leaves of successive iterations.
            if self.active_leaf != ROOT {
                let prev = self.active_leaf;
                self.nodes[prev as usize].set_suffix(leaf);
            }
            self.active_leaf = leaf;

            if oldroot != ROOT {
                self.nodes[oldroot as usize].set_suffix(r);
            }
            oldroot = r;

            match self.nodes[node as usize].suffix() {
                None => {
                    // Only the root lacks a suffix link; dropping the first
                    // byte stands in for the auxiliary bottom state of the
                    // classical formulation.
                    debug_assert_eq!(node, ROOT);
                    part.start += 1;
                }
                Some(link) => {
                    let (n, canon) = self.canonize(link, part.without_last(), key);
                    node = n;
                    part = Span {
                        start: canon.start,
                        end: part.end,
                    };
                }
            }

            let (e, next_r) =
                self.test_and_split(node, part.without_last(), new_byte, rest, id, text, key);
            endpoint = e;
            r = next_r;
        }

        if oldroot != ROOT {
            self.nodes[oldroot as usize].set_suffix(r);
        }

        (node, part)
    }

    /// Decide whether `part + t` is already spelled below `node`. When the
    /// path ends in the middle of an edge label and the label disagrees with
    /// `t`, the edge is split and the new interior node is returned as the
    /// insertion point.
    fn test_and_split(
        &mut self,
        node: NodeId,
        part: Span,
        t: u8,
        rest: Span,
        id: DocId,
        text: u32,
        key: &[u8],
    ) -> (bool, NodeId) {
        let (node, tail) = self.canonize(node, part, key);

        if !tail.is_empty() {
            // The path ends inside the label of the edge under the tail's
            // first byte.
            let first = key[tail.start as usize];
            let eid = self.nodes[node as usize]
                .edge(first)
                .expect("canonized prefix must have an outgoing edge");
            let label = self.edges[eid as usize].label;
            let tail_len = tail.len();
            let next_byte = {
                let bytes = self.label_bytes(label);
                debug_assert!(
                    bytes.starts_with(&key[tail.start as usize..tail.end as usize]),
                    "split-edge label must start with the consumed prefix"
                );
                bytes[tail_len as usize]
            };
            if next_byte == t {
                return (true, node);
            }

            // Split: node --tail--> r --label[tail_len..]--> old destination
            let depth = self.nodes[node as usize].substring_length + tail_len;
            let r = self.new_node(depth);
            let new_eid = self.new_edge(Label::new(text, tail.start, tail.end), node, r);
            self.edges[eid as usize].label = label.slice_from(tail_len);
            self.edges[eid as usize].source = r;
            self.nodes[r as usize].add_edge(next_byte, eid);
            self.nodes[node as usize].add_edge(first, new_eid);
            self.nodes[r as usize].set_source_edge(new_eid);
            (false, r)
        } else {
            let Some(eid) = self.nodes[node as usize].edge(t) else {
                return (false, node);
            };
            let (label, dest) = {
                let edge = &self.edges[eid as usize];
                (edge.label, edge.dest)
            };
            let rest_bytes = &key[rest.start as usize..rest.end as usize];

            enum Outcome {
                Exact,
                Continues,
                Split(u8),
                Diverges,
            }
            let outcome = {
                let label_bytes = self.label_bytes(label);
                if rest_bytes == label_bytes {
                    Outcome::Exact
                } else if rest_bytes.starts_with(label_bytes) {
                    Outcome::Continues
                } else if label_bytes.starts_with(rest_bytes) {
                    Outcome::Split(label_bytes[rest.len() as usize])
                } else {
                    // They diverge past the first byte; the outer loop
                    // handles the divergence.
                    Outcome::Diverges
                }
            };

            match outcome {
                Outcome::Exact => {
                    self.nodes[dest as usize].add_own_id(id);
                    (true, node)
                }
                Outcome::Continues | Outcome::Diverges => (true, node),
                Outcome::Split(next_byte) => {
                    // The remainder ends inside this label: split the edge
                    // and deposit the id at the new interior node.
                    let depth = self.nodes[node as usize].substring_length + rest.len();
                    let mid = self.new_node(depth);
                    self.nodes[mid as usize].add_own_id(id);
                    let new_eid = self.new_edge(Label::new(text, rest.start, rest.end), node, mid);
                    self.edges[eid as usize].label = label.slice_from(rest.len());
                    self.edges[eid as usize].source = mid;
                    self.nodes[mid as usize].add_edge(next_byte, eid);
                    self.nodes[node as usize].add_edge(t, new_eid);
                    self.nodes[mid as usize].set_source_edge(new_eid);
                    (false, node)
                }
            }
        }
    }

    /// Normalize a `(node, remainder)` reference pair by descending while
    /// whole edge labels are consumed.
    pub(crate) fn canonize(&self, node: NodeId, span: Span, key: &[u8]) -> (NodeId, Span) {
        let mut node = node;
        let mut span = span;
        while !span.is_empty() {
            let Some(eid) = self.nodes[node as usize].edge(key[span.start as usize]) else {
                break;
            };
            let edge = &self.edges[eid as usize];
            let label = self.label_bytes(edge.label);
            let len = label.len() as u32;
            if len <= span.len()
                && label == &key[span.start as usize..(span.start + len) as usize]
            {
                span.start += len;
                node = edge.dest;
            } else {
                break;
            }
        }
        (node, span)
    }

    fn new_node(&mut self, substring_length: u32) -> NodeId {
        self.nodes.push(Node::new(substring_length));
        (self.nodes.len() - 1) as NodeId
    }

    fn new_edge(&mut self, label: Label, source: NodeId, dest: NodeId) -> EdgeId {
        self.edges.push(Edge::new(label, source, dest));
        (self.edges.len() - 1) as EdgeId
    }

    /// The root node id
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Look up a node by id. Ids are only meaningful for the tree that
    /// produced them; an id from elsewhere panics or aliases another node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Look up an edge by id
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id as usize]
    }

    /// Resolve an edge label to the bytes it spells
    pub fn label_bytes(&self, label: Label) -> &[u8] {
        &self.texts[label.text as usize].as_bytes()[label.start as usize..label.end as usize]
    }

    /// Parent of `id` via its incoming edge; `None` for the root
    pub fn source_node(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize]
            .source_edge()
            .map(|eid| self.edges[eid as usize].source)
    }

    /// The latest string inserted under `id`, if any
    pub fn document(&self, id: DocId) -> Option<&str> {
        self.documents.get(&id).map(|&text| &*self.texts[text as usize])
    }

    /// Number of distinct document ids
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Whether aggregated id sets are current
    pub fn is_aggregated(&self) -> bool {
        self.bfs.is_some()
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            document_count: self.documents.len(),
            indexed_bytes: self.texts.iter().map(|t| t.len() as u64).sum(),
            aggregated: self.is_aggregated(),
        }
    }
}
