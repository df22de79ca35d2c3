//! Approximate document similarity.
//!
//! Two strings count as similar when `2 * LCSubstr(q, s) / (|q| + |s|)`
//! exceeds the caller's ratio. Rather than computing LCSubstr against every
//! document, the walk starts at the query's terminal node and follows
//! suffix links; each visited node's cached path length is the length of a
//! substring shared between the query and every document aggregated under
//! that node, so it lower-bounds their LCSubstr. Walking parents enumerates
//! shorter shared substrings; the suffix link jumps to the next maximal
//! shared substring that occurs later in the query. Nodes at or below the
//! length threshold cannot qualify for any document and prune the walk.

use crate::error::{Error, Result};
use crate::index::tree::GeneralizedSuffixTree;
use roaring::RoaringBitmap;

impl GeneralizedSuffixTree {
    /// Ids of documents whose similarity to `query` exceeds `ratio`.
    ///
    /// `ratio` must lie strictly inside (0, 1). Requires [`aggregate`] to
    /// have run since the last insert. The result is a plain id set; scores
    /// are not reported.
    ///
    /// [`aggregate`]: GeneralizedSuffixTree::aggregate
    pub fn similar(&self, query: &str, ratio: f32) -> Result<RoaringBitmap> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(Error::InvalidRatio(ratio));
        }
        if !self.is_aggregated() {
            return Err(Error::NotAggregated);
        }

        let mut out = RoaringBitmap::new();
        let min_len = (query.len() as f32 * ratio / 2.0) as u32;

        let Some(start) = self.search_node(query) else {
            return Ok(out);
        };

        let mut suffix = Some(start);
        while let Some(outer) = suffix {
            if self.node(outer).substring_length() <= min_len {
                break;
            }
            let mut ancestor = Some(outer);
            while let Some(id) = ancestor {
                let node = self.node(id);
                if node.substring_length() <= min_len {
                    break;
                }
                let shared = node.substring_length();
                for doc in node.aggregated_ids().iter() {
                    let Some(text) = self.document(doc) else {
                        continue;
                    };
                    let similarity =
                        (2 * shared) as f32 / (query.len() + text.len()) as f32;
                    if similarity > ratio {
                        out.insert(doc);
                    }
                }
                ancestor = self.source_node(id);
            }
            suffix = self.node(outer).suffix();
        }

        Ok(out)
    }
}
