use serde::{Deserialize, Serialize};

use crate::error::RerankError;
use crate::graph::CandidateLayer;
use crate::weights::{EdgeWeight, WeightFunction};

/// Parameters of the order-penalty edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Regularization strength. With `d = 0` the order signal is ignored and
    /// the shortest path degenerates to per-layer score ranking.
    pub d: f64,
    /// Replace the order disagreement with its sign before the penalty.
    pub use_sign: bool,
    /// Retention-time gap at or below which two layers are considered
    /// order-uninformative and the penalty is suppressed. `f64::INFINITY`
    /// disables the order signal entirely.
    pub epsilon_rt: f64,
    /// Log-compress the penalty (`ln(penalty + 1)`) to dampen outliers.
    pub use_log: bool,
}

impl Default for WeightConfig {
    fn default() -> Self {
        WeightConfig {
            d: 1.0,
            use_sign: false,
            epsilon_rt: 0.0,
            use_log: false,
        }
    }
}

/// Edge weight trading the tail candidate's match score against a penalty
/// for disagreeing with the predicted elution order.
///
/// The weight of the edge `(t, i) → (t + 1, j)` is
/// `-scores[t + 1][j] + d * max(0, delta)` where
/// `delta = order_values[t][i] - order_values[t + 1][j]`. Order-consistent
/// transitions (`delta <= 0`, the later-eluting candidate projects higher)
/// are free; only violations are penalized.
pub struct OrderPenaltyWeight {
    config: WeightConfig,
}

impl OrderPenaltyWeight {
    /// Validates the configuration and builds the weight function.
    ///
    /// `d` must be finite and non-negative; `epsilon_rt` must be
    /// non-negative, with `+inf` explicitly allowed.
    pub fn new(config: WeightConfig) -> Result<Self, RerankError> {
        if !config.d.is_finite() || config.d < 0.0 {
            return Err(RerankError::InvalidConfig(format!(
                "regularization strength d must be finite and >= 0, got {}",
                config.d
            )));
        }
        if config.epsilon_rt.is_nan() || config.epsilon_rt < 0.0 {
            return Err(RerankError::InvalidConfig(format!(
                "epsilon_rt must be >= 0, got {}",
                config.epsilon_rt
            )));
        }
        Ok(OrderPenaltyWeight { config })
    }

    pub fn config(&self) -> &WeightConfig {
        &self.config
    }
}

impl WeightFunction for OrderPenaltyWeight {
    fn edge_weight(
        &self,
        layers: &[CandidateLayer],
        head: (usize, usize),
        tail: (usize, usize),
    ) -> EdgeWeight {
        let (t, i) = head;
        let (tp1, j) = tail;
        let head_layer = &layers[t];
        let tail_layer = &layers[tp1];

        // Layers measured at (nearly) the same retention time carry no usable
        // order information; the step degenerates to pure score comparison.
        let rt_gap = (head_layer.retention_time - tail_layer.retention_time).abs();
        let mut order_delta = if rt_gap <= self.config.epsilon_rt {
            0.0
        } else {
            head_layer.order_values[i] - tail_layer.order_values[j]
        };

        if self.config.use_sign {
            order_delta = if order_delta > 0.0 {
                1.0
            } else if order_delta < 0.0 {
                -1.0
            } else {
                0.0
            };
        }

        let mut penalty = order_delta.max(0.0);
        if self.config.use_log {
            penalty = (penalty + 1.0).ln();
        }

        EdgeWeight {
            weight: -tail_layer.scores[j] + self.config.d * penalty,
            order_delta,
        }
    }
}
