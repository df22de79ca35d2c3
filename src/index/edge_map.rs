//! Compact per-node transition map.
//!
//! Most nodes in a suffix tree have very low fan-out, so a hash map per node
//! would dominate the total memory footprint. This map keeps two parallel
//! vectors instead: unsorted and linearly scanned while small, insertion
//! sorted and binary searched once it grows past a threshold.

use crate::index::types::EdgeId;

/// Fan-out above which the arrays are kept sorted and binary searched.
const BSEARCH_THRESHOLD: usize = 6;

/// Maps the first byte of an outgoing edge label to that edge.
///
/// Only the operations the suffix tree needs are provided; there is no
/// removal because the tree never deletes edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    keys: Vec<u8>,
    edges: Vec<EdgeId>,
}

impl EdgeMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Get the edge starting with byte `c`, if any
    pub fn get(&self, c: u8) -> Option<EdgeId> {
        self.search(c).map(|idx| self.edges[idx])
    }

    /// Insert or replace the edge under byte `c`, returning the edge it
    /// replaced, if any
    pub(crate) fn put(&mut self, c: u8, edge: EdgeId) -> Option<EdgeId> {
        match self.search(c) {
            Some(idx) => Some(std::mem::replace(&mut self.edges[idx], edge)),
            None => {
                self.keys.push(c);
                self.edges.push(edge);
                if self.keys.len() > BSEARCH_THRESHOLD {
                    self.sort_pairs();
                }
                None
            }
        }
    }

    fn search(&self, c: u8) -> Option<usize> {
        if self.keys.len() > BSEARCH_THRESHOLD {
            self.keys.binary_search(&c).ok()
        } else {
            self.keys.iter().position(|&k| k == c)
        }
    }

    /// Insertion sort of both arrays keyed on `keys`. Preferred over the
    /// standard sort because of the small sizes involved (at most the
    /// alphabet, typically far fewer).
    fn sort_pairs(&mut self) {
        for i in 1..self.keys.len() {
            let mut j = i;
            while j > 0 && self.keys[j - 1] > self.keys[j] {
                self.keys.swap(j - 1, j);
                self.edges.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    /// Enumerate edges in arbitrary but stable order
    pub fn values(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
