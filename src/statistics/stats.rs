use serde::Serialize;

/// Counters describing the work performed by solver and reranker runs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stats {
    dp_passes: usize,
    edges_scored: usize,
    paths_extracted: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            dp_passes: 0,
            edges_scored: 0,
            paths_extracted: 0,
        }
    }

    /// Record into the statistics object that a full forward DP pass has
    /// been performed
    pub fn bump_dp_passes(&mut self) {
        self.dp_passes += 1
    }

    /// Record into the statistics object that a bunch of edges were scored
    /// during relaxation
    pub fn bump_edges(&mut self, edge_amount: usize) {
        self.edges_scored += edge_amount
    }

    /// Record into the statistics object that one more shortest path was
    /// extracted by the reranker
    pub fn bump_paths_extracted(&mut self) {
        self.paths_extracted += 1
    }

    pub fn get_dp_passes(&self) -> usize {
        self.dp_passes
    }

    pub fn get_edges_scored(&self) -> usize {
        self.edges_scored
    }

    pub fn get_paths_extracted(&self) -> usize {
        self.paths_extracted
    }

    /// Combine two statistics objects, e.g. across independent reranking
    /// runs of a parameter sweep.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            dp_passes: self.dp_passes + other.dp_passes,
            edges_scored: self.edges_scored + other.edges_scored,
            paths_extracted: self.paths_extracted + other.paths_extracted,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = Stats::new();
        assert_eq!(stats.get_dp_passes(), 0);
        assert_eq!(stats.get_edges_scored(), 0);
        assert_eq!(stats.get_paths_extracted(), 0);
    }

    #[test]
    fn test_default_stats_initialized_to_zero() {
        let stats = Stats::default();
        assert_eq!(stats.get_dp_passes(), 0);
        assert_eq!(stats.get_edges_scored(), 0);
    }

    #[test]
    fn test_bump_dp_passes_increments_by_one() {
        let mut stats = Stats::new();
        stats.bump_dp_passes();
        assert_eq!(stats.get_dp_passes(), 1);
        assert_eq!(stats.get_edges_scored(), 0);
    }

    #[test]
    fn test_bump_edges_accumulates() {
        let mut stats = Stats::new();
        stats.bump_edges(5);
        stats.bump_edges(10);
        stats.bump_edges(3);
        assert_eq!(stats.get_edges_scored(), 18);
    }

    #[test]
    fn test_bump_edges_with_zero() {
        let mut stats = Stats::new();
        stats.bump_edges(0);
        assert_eq!(stats.get_edges_scored(), 0);
    }

    #[test]
    fn test_bump_paths_extracted() {
        let mut stats = Stats::new();
        stats.bump_paths_extracted();
        stats.bump_paths_extracted();
        assert_eq!(stats.get_paths_extracted(), 2);
    }

    #[test]
    fn test_merge_adds_all_counters() {
        let mut a = Stats::new();
        a.bump_dp_passes();
        a.bump_edges(4);

        let mut b = Stats::new();
        b.bump_dp_passes();
        b.bump_edges(6);
        b.bump_paths_extracted();

        let merged = a.merge(&b);
        assert_eq!(merged.get_dp_passes(), 2);
        assert_eq!(merged.get_edges_scored(), 10);
        assert_eq!(merged.get_paths_extracted(), 1);
    }
}
