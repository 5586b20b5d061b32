use serde::Serialize;
use tracing::{debug, info};

use crate::error::RerankError;
use crate::graph::{CandidateLayer, retained_indices};
use crate::solver::ShortestPathSolver;
use crate::statistics::Stats;
use crate::weights::WeightFunction;

/// Result of a top-k reranking run.
///
/// All sequences are aligned per extracted path and may be shorter than the
/// requested `k` when the graph runs out of eligible candidates first. Each
/// path is expressed in the index space of the layers that were still alive
/// when it was extracted; `layer_indices` maps those positions back to the
/// caller's original layer sequence.
#[derive(Debug, Clone, Serialize)]
pub struct RerankOutcome {
    /// Cumulative identification accuracy in percent after each path,
    /// non-decreasing, over the total number of layers.
    pub accuracies: Vec<f64>,
    /// The extracted paths, best first.
    pub paths: Vec<Vec<usize>>,
    /// Original layer index per path position: `layer_indices[m][p]` is the
    /// layer that `paths[m][p]` refers to.
    pub layer_indices: Vec<Vec<usize>>,
    /// Cost of each extracted path.
    pub costs: Vec<f64>,
    /// Accumulated order disagreement of each path (diagnostic).
    pub order_deltas: Vec<f64>,
    /// Work counters for the whole run.
    pub stats: Stats,
}

/// Extracts up to `k` distinct shortest paths from a candidate graph by
/// blocking every chosen candidate between iterations.
///
/// Iterations are strictly sequential: the `m + 1`-th path is computed on
/// the blocking state left behind by the `m`-th. The reranker operates on an
/// owned deep copy of the input layers, so repeated calls against the same
/// graph (e.g. with different regularization strengths) never observe each
/// other's blocking state.
pub struct TopKReranker {
    topk: usize,
    cutoff: Option<usize>,
}

impl TopKReranker {
    pub fn new(topk: usize, cutoff: Option<usize>) -> Self {
        TopKReranker { topk, cutoff }
    }

    /// Runs the iterative extraction. Returns fewer than `k` entries if
    /// every layer exhausts first; that is a normal termination, not an
    /// error.
    pub fn rerank<W: WeightFunction>(
        &self,
        layers: &[CandidateLayer],
        weights: &W,
    ) -> Result<RerankOutcome, RerankError> {
        // Owned snapshot: blocking never leaks back into the caller's graph,
        // and stale blocking from a previous run never leaks in.
        let mut snapshot: Vec<CandidateLayer> = layers.to_vec();
        for layer in &mut snapshot {
            layer.blocked = vec![false; layer.width()];
        }

        let solver = ShortestPathSolver::new(self.cutoff, true, true);
        let mut stats = Stats::new();

        let mut num_correct: Vec<usize> = Vec::new();
        let mut paths: Vec<Vec<usize>> = Vec::new();
        let mut layer_indices: Vec<Vec<usize>> = Vec::new();
        let mut costs: Vec<f64> = Vec::new();
        let mut order_deltas: Vec<f64> = Vec::new();

        for k in 0..self.topk {
            // Layers with every retained candidate blocked drop out of the
            // sub-sequence; `active` is the position → original-index map.
            let active = retained_indices(&snapshot, self.cutoff);
            if active.is_empty() {
                debug!(extracted = k, "graph exhausted before reaching k");
                break;
            }

            let sub: Vec<CandidateLayer> = active.iter().map(|&t| snapshot[t].clone()).collect();
            let result = solver.solve(&sub, weights, &mut stats)?;
            stats.bump_paths_extracted();

            let mut correct = 0usize;
            for (p, &cand) in result.path.iter().enumerate() {
                let t = active[p];
                if snapshot[t].is_true[cand] {
                    correct += 1;
                }
                snapshot[t].blocked[cand] = true;
            }

            num_correct.push(correct);
            paths.push(result.path);
            layer_indices.push(active);
            costs.push(result.cost);
            order_deltas.push(result.order_delta);
        }

        let total = layers.len() as f64;
        let mut accuracies = Vec::with_capacity(num_correct.len());
        let mut hits = 0usize;
        for correct in num_correct {
            hits += correct;
            accuracies.push(hits as f64 / total * 100.0);
        }

        info!(
            layers = layers.len(),
            extracted = paths.len(),
            requested = self.topk,
            top1 = accuracies.first().copied().unwrap_or(0.0),
            "reranking complete"
        );

        Ok(RerankOutcome {
            accuracies,
            paths,
            layer_indices,
            costs,
            order_deltas,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{OrderPenaltyWeight, WeightConfig};

    fn layer(
        rt: f64,
        scores: Vec<f64>,
        order_values: Vec<f64>,
        true_idx: usize,
    ) -> CandidateLayer {
        let n = scores.len();
        let is_true: Vec<bool> = (0..n).map(|i| i == true_idx).collect();
        let ids = (0..n).map(|i| format!("cand-{i}")).collect();
        CandidateLayer::new("spec", rt, scores, order_values, is_true, ids)
    }

    fn score_only_weight() -> OrderPenaltyWeight {
        OrderPenaltyWeight::new(WeightConfig {
            d: 0.0,
            ..WeightConfig::default()
        })
        .unwrap()
    }

    fn uniform_graph(width: usize) -> Vec<CandidateLayer> {
        (0..3)
            .map(|t| {
                let scores: Vec<f64> = (0..width).map(|i| 1.0 - 0.1 * i as f64).collect();
                let order_values = vec![t as f64; width];
                layer(t as f64, scores, order_values, t % width)
            })
            .collect()
    }

    #[test]
    fn test_accuracy_is_monotone_nondecreasing() {
        let graph = uniform_graph(4);
        let outcome = TopKReranker::new(4, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();
        for pair in outcome.accuracies.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        // with 4 candidates per layer, the true one is found by rank 4
        assert!((outcome.accuracies[3] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_exhaustion_truncates_output() {
        // uniform width 2, so only 2 distinct paths exist
        let graph = uniform_graph(2);
        let outcome = TopKReranker::new(10, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();
        assert_eq!(outcome.paths.len(), 2);
        assert_eq!(outcome.accuracies.len(), 2);
        assert_eq!(outcome.costs.len(), 2);
        assert_eq!(outcome.stats.get_paths_extracted(), 2);
    }

    #[test]
    fn test_paths_are_distinct_per_layer() {
        let graph = uniform_graph(3);
        let outcome = TopKReranker::new(3, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();
        assert_eq!(outcome.paths.len(), 3);
        // every iteration blocks its candidates, so no (layer, candidate)
        // pair may repeat across paths
        for t in 0..graph.len() {
            let mut chosen: Vec<usize> = outcome
                .paths
                .iter()
                .zip(&outcome.layer_indices)
                .flat_map(|(path, map)| {
                    path.iter()
                        .zip(map)
                        .filter(|&(_, &orig)| orig == t)
                        .map(|(&c, _)| c)
                })
                .collect();
            chosen.sort_unstable();
            chosen.dedup();
            assert_eq!(chosen.len(), 3);
        }
    }

    #[test]
    fn test_caller_layers_are_never_mutated() {
        let graph = uniform_graph(2);
        TopKReranker::new(2, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();
        for layer in &graph {
            assert!(layer.blocked.iter().all(|&b| !b));
        }
    }

    #[test]
    fn test_stale_blocking_in_input_is_ignored() {
        let mut graph = uniform_graph(2);
        graph[0].blocked = vec![true, true];
        let outcome = TopKReranker::new(2, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();
        // the snapshot resets blocking, so both paths still exist
        assert_eq!(outcome.paths.len(), 2);
    }

    #[test]
    fn test_narrow_layer_drops_out_midway() {
        // the middle layer has a single candidate: it exhausts after the
        // first path, later paths must skip it via the index mapping
        let graph = vec![
            layer(1.0, vec![0.9, 0.5], vec![0.0, 0.0], 0),
            layer(2.0, vec![0.8], vec![0.0], 0),
            layer(3.0, vec![0.7, 0.2], vec![0.0, 0.0], 1),
        ];
        let outcome = TopKReranker::new(3, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();

        assert_eq!(outcome.paths.len(), 2);
        assert_eq!(outcome.layer_indices[0], vec![0, 1, 2]);
        assert_eq!(outcome.paths[0], vec![0, 0, 0]);
        // second iteration: layer 1 is exhausted, remaining layers keep
        // their original identity through the mapping
        assert_eq!(outcome.layer_indices[1], vec![0, 2]);
        assert_eq!(outcome.paths[1], vec![1, 1]);

        // layer 0 true candidate found first, layer 2's in the second path;
        // layer 1's candidate was true as well
        assert!((outcome.accuracies[0] - 2.0 / 3.0 * 100.0).abs() < 1e-9);
        assert!((outcome.accuracies[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reranking_beats_score_baseline_when_order_is_informative() {
        // the true candidates elute in order 1, 2, 3 and the order model is
        // perfect; the decoys with the best scores all project out of order
        let graph = vec![
            layer(1.0, vec![0.9, 0.8], vec![9.0, 1.0], 1),
            layer(2.0, vec![0.9, 0.8], vec![0.5, 2.0], 1),
            layer(3.0, vec![0.9, 0.8], vec![0.1, 3.0], 1),
        ];
        let score_only = TopKReranker::new(1, None)
            .rerank(&graph, &score_only_weight())
            .unwrap();
        assert!((score_only.accuracies[0] - 0.0).abs() < 1e-9);

        let regularized = OrderPenaltyWeight::new(WeightConfig {
            d: 2.0,
            ..WeightConfig::default()
        })
        .unwrap();
        let reranked = TopKReranker::new(1, None).rerank(&graph, &regularized).unwrap();
        assert!((reranked.accuracies[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cutoff_limits_extraction_depth() {
        // width 3 but cutoff 2: only two paths can exist before every
        // retained candidate is blocked
        let graph = uniform_graph(3);
        let outcome = TopKReranker::new(10, Some(2))
            .rerank(&graph, &score_only_weight())
            .unwrap();
        assert_eq!(outcome.paths.len(), 2);
    }
}
