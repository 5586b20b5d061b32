use crate::graph::CandidateLayer;

/// Result of evaluating one edge of the candidate graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeWeight {
    /// Cost added to the cumulative path cost when the edge is taken.
    pub weight: f64,
    /// Raw order disagreement between head and tail, before clamping.
    /// Negative means the pair agrees with the predicted elution order.
    /// Tracked along the path for diagnostic purposes only.
    pub order_delta: f64,
}

/// A trait defining the edge-weighting strategy of the shortest-path solver.
///
/// Implementations score the transition from candidate `i` of layer `t` (the
/// head) to candidate `j` of layer `t + 1` (the tail). The contract is
/// Markov: the weight may depend only on the two adjacent layers, which is
/// what keeps the forward dynamic program valid and linearly additive.
///
/// Implementations include:
/// - [`OrderPenaltyWeight`](crate::weights::OrderPenaltyWeight): match score
///   of the tail plus a regularized elution-order violation penalty.
pub trait WeightFunction {
    /// Evaluates the edge from `head = (t, i)` to `tail = (t + 1, j)`.
    ///
    /// Both nodes index into `layers`; the solver guarantees
    /// `head.0 + 1 == tail.0` and in-bounds candidate indices.
    fn edge_weight(
        &self,
        layers: &[CandidateLayer],
        head: (usize, usize),
        tail: (usize, usize),
    ) -> EdgeWeight;
}
