//! Performance statistics tracking for solver and reranker runs.
//!
//! This module provides structures for collecting and aggregating metrics
//! about reranking work: DP passes performed, edges scored during relaxation,
//! and shortest paths extracted.

mod stats;
pub use stats::*;
