//! Numerical helpers shared across the solver and the graph model.
//!
//! The only inhabitant is a total-order wrapper around `f64`, used wherever
//! path costs or match scores need to be compared or sorted deterministically.

mod ordered_float;

pub use ordered_float::TotalF64;
