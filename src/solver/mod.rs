//! Shortest-path machinery over the layered candidate graph.
//!
//! [`ShortestPathSolver`] runs a single forward dynamic program;
//! [`TopKReranker`] drives it repeatedly with candidate blocking to extract
//! k distinct rankings and the resulting identification-accuracy curve.

mod reranker;
mod shortest_path;

pub use reranker::*;
pub use shortest_path::*;
