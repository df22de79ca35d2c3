//! Error types surfaced by the tree API.

use crate::index::types::DocId;
use thiserror::Error;

/// Errors returned by [`GeneralizedSuffixTree`](crate::GeneralizedSuffixTree).
///
/// None of these are recovered internally; they all indicate caller mistakes.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Document ids must be inserted in non-decreasing order.
    #[error("document id {id} is smaller than the last inserted id {last}")]
    IdOrdering { id: DocId, last: DocId },

    /// An aggregation-dependent query ran while the aggregated id sets are
    /// stale. Call `aggregate()` after the last insert.
    #[error("aggregation has not been run since the last insert")]
    NotAggregated,

    /// The similarity ratio must lie strictly inside (0, 1).
    #[error("similarity ratio must be within (0, 1), got {0}")]
    InvalidRatio(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
