//! Error taxonomy for the reranking engine.

use thiserror::Error;

/// Errors surfaced by weight-function construction, input validation and the
/// solver itself.
///
/// Graph exhaustion is deliberately absent from this enum: a reranking run
/// that blocks every eligible candidate before reaching `k` paths terminates
/// normally with a shorter result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RerankError {
    /// Weight-function configuration rejected before any solver work starts.
    #[error("invalid weight configuration: {0}")]
    InvalidConfig(String),

    /// The solver was handed an empty layer sequence.
    #[error("candidate graph contains no layers")]
    EmptyGraph,

    #[error("layer {layer}: match scores are not sorted in descending order")]
    UnsortedScores { layer: usize },

    #[error("layer {layer}: retention time decreases with respect to the previous layer")]
    RetentionTimeOrder { layer: usize },

    #[error(
        "layer {layer}: blocked vector has length {blocked} but the layer holds {candidates} candidates"
    )]
    BlockedLengthMismatch {
        layer: usize,
        blocked: usize,
        candidates: usize,
    },

    #[error("layer {layer}: candidate vectors have mismatched lengths")]
    MisalignedLayer { layer: usize },

    #[error("layer {layer}: expected exactly one true candidate, found {count}")]
    TrueCandidateCount { layer: usize, count: usize },

    /// Every retained candidate of the layer is blocked. The caller must drop
    /// such a layer from the sequence before invoking the solver.
    #[error("layer {layer}: no eligible candidates remain")]
    EmptyLayer { layer: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_layer() {
        let err = RerankError::UnsortedScores { layer: 3 };
        assert!(err.to_string().contains("layer 3"));

        let err = RerankError::BlockedLengthMismatch {
            layer: 1,
            blocked: 2,
            candidates: 5,
        };
        assert!(err.to_string().contains("length 2"));
        assert!(err.to_string().contains("5 candidates"));
    }
}
