use crate::error::RerankError;

/// Scored candidate list for a single mass-spectrometry measurement.
///
/// One layer of the candidate graph. Candidates are sorted by descending
/// match score, and all per-candidate vectors are aligned index-for-index.
///
/// # Invariants
/// - `scores` is sorted descending (ties allowed, broken by dense ranks).
/// - Exactly one entry of `is_true` is set.
/// - `order_values`, `is_true`, `blocked` and `ids` all have the same length
///   as `scores`.
///
/// `blocked` starts all-false and is flipped only by the top-k reranker,
/// never by the solver.
///
/// # Example
/// ```
/// use elupath::graph::CandidateLayer;
///
/// let layer = CandidateLayer::new(
///     "spec-0001",
///     4.2,
///     vec![0.9, 0.5],
///     vec![2.0, 1.0],
///     vec![false, true],
///     vec!["cand-a".into(), "cand-b".into()],
/// );
/// assert_eq!(layer.width(), 2);
/// assert_eq!(layer.true_index(), Some(1));
/// assert!(layer.validate(0, false).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CandidateLayer {
    /// Identifier of the measurement (spectrum) this layer belongs to.
    pub spectrum_id: String,
    /// Retention time of the measurement.
    pub retention_time: f64,
    /// Match scores, descending. Higher is better.
    pub scores: Vec<f64>,
    /// Predicted elution-order projection per candidate.
    pub order_values: Vec<f64>,
    /// Ground-truth marker, exactly one `true`.
    pub is_true: Vec<bool>,
    /// Candidates excluded from path extraction. Mutated by the reranker.
    pub blocked: Vec<bool>,
    /// Opaque candidate identifiers for result reporting.
    pub ids: Vec<String>,
}

impl CandidateLayer {
    pub fn new(
        spectrum_id: impl Into<String>,
        retention_time: f64,
        scores: Vec<f64>,
        order_values: Vec<f64>,
        is_true: Vec<bool>,
        ids: Vec<String>,
    ) -> Self {
        let blocked = vec![false; scores.len()];
        CandidateLayer {
            spectrum_id: spectrum_id.into(),
            retention_time,
            scores,
            order_values,
            is_true,
            blocked,
            ids,
        }
    }

    /// Number of candidates in this layer.
    pub fn width(&self) -> usize {
        self.scores.len()
    }

    /// Number of candidates actually considered by a solver run with the
    /// given per-layer cutoff.
    pub fn retained_width(&self, cutoff: Option<usize>) -> usize {
        match cutoff {
            Some(c) => self.width().min(c),
            None => self.width(),
        }
    }

    /// Index of the ground-truth candidate, if the layer carries one.
    pub fn true_index(&self) -> Option<usize> {
        self.is_true.iter().position(|&t| t)
    }

    /// Dense rank of each candidate based on the match scores alone: the
    /// best score gets rank 1, equal scores share a rank.
    pub fn dense_ranks(&self) -> Vec<u32> {
        let mut ranks = Vec::with_capacity(self.scores.len());
        let mut rank = 0u32;
        let mut last_score = f64::INFINITY;
        for &score in &self.scores {
            if score < last_score {
                last_score = score;
                rank += 1;
            }
            ranks.push(rank);
        }
        ranks
    }

    /// Score-only dense rank of the true candidate. This is the rank a
    /// match-score baseline would assign, with no order information.
    pub fn true_rank(&self) -> Option<u32> {
        let idx = self.true_index()?;
        Some(self.dense_ranks()[idx])
    }

    /// Whether every candidate the solver could retain is blocked. A layer
    /// in this state must be dropped from the sequence before solving.
    pub fn is_exhausted(&self, cutoff: Option<usize>) -> bool {
        let retained = self.retained_width(cutoff);
        self.blocked[..retained].iter().all(|&b| b)
    }

    /// Checks the per-layer invariants, reporting `layer` as the offending
    /// position in the sequence. When `require_blocked` is set, the blocked
    /// vector must match the candidate count (the solver is about to honor
    /// it).
    pub fn validate(&self, layer: usize, require_blocked: bool) -> Result<(), RerankError> {
        let n = self.scores.len();
        if self.order_values.len() != n || self.is_true.len() != n || self.ids.len() != n {
            return Err(RerankError::MisalignedLayer { layer });
        }
        if self.scores.windows(2).any(|w| w[0] < w[1]) {
            return Err(RerankError::UnsortedScores { layer });
        }
        let true_count = self.is_true.iter().filter(|&&t| t).count();
        if true_count != 1 {
            return Err(RerankError::TrueCandidateCount {
                layer,
                count: true_count,
            });
        }
        if require_blocked && self.blocked.len() != n {
            return Err(RerankError::BlockedLengthMismatch {
                layer,
                blocked: self.blocked.len(),
                candidates: n,
            });
        }
        Ok(())
    }
}
