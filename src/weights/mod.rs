//! Edge-weighting strategies for the candidate graph.
//!
//! The solver is parameterized over a [`WeightFunction`] so that alternative
//! weighting schemes can be added without touching the dynamic program.

mod order_penalty;
mod weight_function;

pub use order_penalty::*;
pub use weight_function::*;
