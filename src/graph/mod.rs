//! Layered candidate-graph model.
//!
//! One [`CandidateLayer`] per measurement, ordered by retention time. The
//! layer sequence forms a DAG where every candidate of layer `t` connects to
//! every candidate of layer `t + 1`; edges are materialized lazily by the
//! solver through a weight function.

mod candidate_layer;
mod layer_graph;

pub use candidate_layer::*;
pub use layer_graph::*;
