//! Elution-order reranking of molecular candidate assignments.
//!
//! Re-ranks sets of candidate structures assigned to mass-spectrometry
//! measurements by combining per-candidate match scores with a predicted
//! elution-order consistency signal. The candidate lists form a layered DAG
//! ordered by retention time; a forward dynamic program extracts the
//! minimum-cost assignment, and iterative blocking extracts the k best
//! distinct assignments together with the identification-accuracy curve.

pub mod error;
pub mod graph;
pub mod numerics;
pub mod solver;
pub mod statistics;
pub mod synthetic;
pub mod weights;
