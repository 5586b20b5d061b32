use serde::Serialize;
use tracing::debug;

use crate::error::RerankError;
use crate::graph::{CandidateLayer, validate_graph};
use crate::numerics::TotalF64;
use crate::statistics::Stats;
use crate::weights::WeightFunction;

/// One optimal assignment of a candidate to every layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Chosen candidate index per layer, `path[t]` indexing layer `t`.
    pub path: Vec<usize>,
    /// Total cost of the path (sum of edge weights plus the first layer's
    /// negated score). Lower is better.
    pub cost: f64,
    /// Accumulated raw order disagreement along the path. Diagnostic only;
    /// it never influences which path is chosen.
    pub order_delta: f64,
}

/// Forward dynamic program over an ordered sequence of candidate layers.
///
/// The graph is layered and complete between adjacent layers, so a single
/// forward sweep relaxing every `(t, i) → (t + 1, j)` edge computes the
/// minimal cumulative cost of reaching every node, in `O(L * C^2)` where `C`
/// is the per-layer cutoff. Backtracking over parent pointers then yields
/// the optimal path.
///
/// Ties are deterministic: relaxation uses a strict `<` with ascending `i`,
/// so the lowest-index predecessor wins, and the terminal scan keeps the
/// lowest-index minimum.
pub struct ShortestPathSolver {
    cutoff: Option<usize>,
    exclude_blocked: bool,
    check_input: bool,
}

impl ShortestPathSolver {
    /// - `cutoff`: per-layer candidate retention limit; only the `cutoff`
    ///   highest-scoring candidates of each layer participate (`None` =
    ///   unbounded).
    /// - `exclude_blocked`: skip candidates whose `blocked` flag is set.
    /// - `check_input`: validate the graph invariants before any DP work.
    pub fn new(cutoff: Option<usize>, exclude_blocked: bool, check_input: bool) -> Self {
        ShortestPathSolver {
            cutoff,
            exclude_blocked,
            check_input,
        }
    }

    fn is_skipped(&self, layer: &CandidateLayer, candidate: usize) -> bool {
        self.exclude_blocked && layer.blocked[candidate]
    }

    /// Runs the forward DP and backtracks the single optimal path.
    ///
    /// Validation failures (when enabled) abort before any table is built;
    /// the caller receives no partial result.
    pub fn solve<W: WeightFunction>(
        &self,
        layers: &[CandidateLayer],
        weights: &W,
        stats: &mut Stats,
    ) -> Result<PathResult, RerankError> {
        if layers.is_empty() {
            return Err(RerankError::EmptyGraph);
        }
        if self.check_input {
            validate_graph(layers, self.exclude_blocked)?;
            for (t, layer) in layers.iter().enumerate() {
                let retained = layer.retained_width(self.cutoff);
                if (0..retained).all(|i| self.is_skipped(layer, i)) {
                    return Err(RerankError::EmptyLayer { layer: t });
                }
            }
        }

        let n_layers = layers.len();

        // Cumulative cost, accumulated order delta and backpointer per node.
        // Live only for the duration of this call.
        let mut cost: Vec<Vec<f64>> = Vec::with_capacity(n_layers);
        let mut delta: Vec<Vec<f64>> = Vec::with_capacity(n_layers);
        let mut parent: Vec<Vec<Option<usize>>> = Vec::with_capacity(n_layers);

        // The first layer's scores must enter the path cost too; blocked
        // candidates are seeded unreachable.
        let n_first = layers[0].retained_width(self.cutoff);
        cost.push(
            (0..n_first)
                .map(|i| {
                    if self.is_skipped(&layers[0], i) {
                        f64::INFINITY
                    } else {
                        -layers[0].scores[i]
                    }
                })
                .collect(),
        );
        delta.push(vec![0.0; n_first]);
        parent.push(vec![None; n_first]);

        for t in 0..n_layers - 1 {
            let n_t = layers[t].retained_width(self.cutoff);
            let n_tp1 = layers[t + 1].retained_width(self.cutoff);

            cost.push(vec![f64::INFINITY; n_tp1]);
            delta.push(vec![f64::NEG_INFINITY; n_tp1]);
            parent.push(vec![None; n_tp1]);

            for i in 0..n_t {
                if self.is_skipped(&layers[t], i) {
                    continue;
                }
                let cost_t_i = cost[t][i];
                if !cost_t_i.is_finite() {
                    // unreachable head, nothing to relax from
                    continue;
                }
                let delta_t_i = delta[t][i];

                for j in 0..n_tp1 {
                    if self.is_skipped(&layers[t + 1], j) {
                        continue;
                    }
                    let edge = weights.edge_weight(layers, (t, i), (t + 1, j));
                    stats.bump_edges(1);

                    let cost_tp1_j = cost_t_i + edge.weight;
                    if cost_tp1_j < cost[t + 1][j] {
                        cost[t + 1][j] = cost_tp1_j;
                        delta[t + 1][j] = delta_t_i + edge.order_delta;
                        parent[t + 1][j] = Some(i);
                    }
                }
            }
        }
        stats.bump_dp_passes();

        // Terminal node: lowest cumulative cost, lowest index on ties.
        let last_costs = &cost[n_layers - 1];
        let mut terminal: Option<usize> = None;
        for (j, &c) in last_costs.iter().enumerate() {
            if !c.is_finite() {
                continue;
            }
            match terminal {
                Some(best) if TotalF64(c) >= TotalF64(last_costs[best]) => {}
                _ => terminal = Some(j),
            }
        }
        let Some(terminal) = terminal else {
            // every terminal candidate is blocked or unreachable
            return Err(RerankError::EmptyLayer { layer: n_layers - 1 });
        };

        let mut path = vec![terminal];
        let mut t = n_layers - 1;
        while let Some(par) = parent[t][path[path.len() - 1]] {
            path.push(par);
            t -= 1;
        }
        path.reverse();
        debug_assert_eq!(path.len(), n_layers);

        let result = PathResult {
            path,
            cost: cost[n_layers - 1][terminal],
            order_delta: delta[n_layers - 1][terminal],
        };
        debug!(
            layers = n_layers,
            cost = result.cost,
            "shortest path extracted"
        );
        Ok(result)
    }
}
