use crate::error::RerankError;
use crate::graph::CandidateLayer;

/// Checks the cross-layer invariants of a candidate graph: every layer is
/// internally consistent and retention times never decrease along the
/// sequence. Layer indices in errors refer to positions in `layers`.
pub fn validate_graph(layers: &[CandidateLayer], require_blocked: bool) -> Result<(), RerankError> {
    let mut rt = f64::NEG_INFINITY;
    for (t, layer) in layers.iter().enumerate() {
        layer.validate(t, require_blocked)?;
        if layer.retention_time < rt {
            return Err(RerankError::RetentionTimeOrder { layer: t });
        }
        rt = layer.retention_time;
    }
    Ok(())
}

/// Positions of the non-exhausted layers, in sequence order.
///
/// This is the explicit sub-sequence → original-index bijection used between
/// top-k iterations: entry `p` of the returned vector is the original index
/// of the `p`-th layer handed to the solver.
pub fn retained_indices(layers: &[CandidateLayer], cutoff: Option<usize>) -> Vec<usize> {
    layers
        .iter()
        .enumerate()
        .filter(|(_, layer)| !layer.is_exhausted(cutoff))
        .map(|(t, _)| t)
        .collect()
}

/// Cumulative top-k identification accuracy (in percent) of the match-score
/// baseline, i.e. ranking candidates per layer by score alone with no order
/// information. Entry `m` is the share of layers whose true candidate sits
/// within the best `m + 1` score ranks.
pub fn baseline_topk_accuracy(layers: &[CandidateLayer], k: usize) -> Vec<f64> {
    let total = layers.len() as f64;
    let mut accuracies = Vec::with_capacity(k);
    for m in 1..=k {
        let hits = layers
            .iter()
            .filter(|layer| layer.true_rank().is_some_and(|r| r as usize <= m))
            .count();
        accuracies.push(hits as f64 / total * 100.0);
    }
    accuracies
}
