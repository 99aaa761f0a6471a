//! Tables produced by a pipeline run.

use crate::matrix::{Matrix, ScreenTimeMatrix};
use crate::rank::ContributionScore;
use crate::stats::Statistics;
use serde::{Deserialize, Serialize};

/// Everything a run computes, in the order it was computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Parsed screen time in minutes
    pub screen_time: ScreenTimeMatrix,
    /// DF, IDF, TF and TF-IDF
    pub statistics: Statistics,
    /// Contribution scores, highest franchise contribution first
    pub ranking: Vec<ContributionScore>,
    /// Appearances dropped for not being on the allow-list
    pub dropped_appearances: usize,
    /// Appearances folded into another alias of the same character
    pub merged_appearances: usize,
    /// Characters removed because none of their times parsed
    pub pruned_characters: Vec<String>,
}

impl PipelineOutput {
    /// Per-movie TF-IDF table
    pub fn tf_idf(&self) -> &Matrix<f64> {
        &self.statistics.tf_idf
    }

    /// The `n` highest-ranked characters
    pub fn top(&self, n: usize) -> &[ContributionScore] {
        &self.ranking[..n.min(self.ranking.len())]
    }

    /// Contribution score of one character
    pub fn score(&self, character: &str) -> Option<&ContributionScore> {
        self.ranking.iter().find(|s| s.character == character)
    }
}
