//! Query execution over a built tree.
//!
//! - [`exact`] - Root-anchored descent for exact substring lookup
//! - [`similar`] - Suffix-link walk for approximate document similarity
//!
//! Exact search works at any time (it scans the matched subtree on the fly
//! while aggregated sets are stale); similarity requires aggregation.

pub mod exact;
pub mod similar;
