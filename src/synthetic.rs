//! Synthetic candidate-graph generation.
//!
//! Stands in for the external order-prediction-and-scoring collaborator:
//! produces layer sequences with known ground truth, noisy order-model
//! projections and descending match scores. Used by the demo binary and by
//! end-to-end tests.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use crate::error::RerankError;
use crate::graph::CandidateLayer;
use crate::numerics::TotalF64;

/// Parameters of the synthetic graph generator.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticConfig {
    /// Number of measurement layers.
    pub n_layers: usize,
    /// Candidates per layer.
    pub width: usize,
    /// Standard deviation of the gaussian noise added to the order
    /// projections. At `0.0` the order model is perfect.
    pub order_noise: f64,
    /// Seed for the generator; identical seeds yield identical graphs.
    pub seed: u64,
}

/// Generates a candidate graph with one ground-truth candidate per layer.
///
/// The true candidate's order projection is centered on the layer's
/// retention time, decoys project to random positions over the whole run.
/// Scores are drawn so that the true candidate is usually, but not always,
/// well ranked, which leaves room for order-based reranking to help.
pub fn generate(config: SyntheticConfig) -> Result<Vec<CandidateLayer>, RerankError> {
    if config.n_layers == 0 || config.width == 0 {
        return Err(RerankError::InvalidConfig(
            "synthetic graph needs at least one layer and one candidate".into(),
        ));
    }
    let noise = Normal::new(0.0, config.order_noise).map_err(|e| {
        RerankError::InvalidConfig(format!("invalid order noise {}: {e}", config.order_noise))
    })?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let rt_span = config.n_layers as f64;

    let mut layers = Vec::with_capacity(config.n_layers);
    let mut rt = 0.0;
    for t in 0..config.n_layers {
        rt += rng.random_range(0.5..1.5);

        // (score, order projection, is_true) tuples, true candidate first
        let mut candidates: Vec<(f64, f64, bool)> = Vec::with_capacity(config.width);
        candidates.push((rng.random_range(0.4..1.0), rt + noise.sample(&mut rng), true));
        for _ in 1..config.width {
            candidates.push((
                rng.random_range(0.0..0.9),
                rng.random_range(0.0..rt_span * 1.5) + noise.sample(&mut rng),
                false,
            ));
        }
        candidates.sort_by(|a, b| TotalF64(b.0).cmp(&TotalF64(a.0)));

        let scores = candidates.iter().map(|c| c.0).collect();
        let order_values = candidates.iter().map(|c| c.1).collect();
        let is_true = candidates.iter().map(|c| c.2).collect();
        let ids = (0..config.width)
            .map(|i| format!("cand-{t}-{i}"))
            .collect();

        layers.push(CandidateLayer::new(
            format!("spec-{t:04}"),
            rt,
            scores,
            order_values,
            is_true,
            ids,
        ));
    }

    Ok(layers)
}
