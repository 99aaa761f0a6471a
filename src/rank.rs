//! Contribution scores and ranking
//!
//! Each character gets two aggregate scores over its present TF-IDF cells:
//! the mean over the movies it appears in, and the sum divided by the fixed
//! franchise size. The second one is deliberately not normalized by the
//! character's own movie count, so characters with more exposure rank higher.

use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// Aggregate TF-IDF scores for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionScore {
    /// Canonical character ID
    pub character: String,
    /// Mean TF-IDF over the character's own movies
    pub mean_own_movies: f64,
    /// Sum of TF-IDF divided by the franchise size
    pub franchise_contribution: f64,
}

impl ContributionScore {
    /// Aggregate a character's present TF-IDF values.
    ///
    /// An empty slice yields NaN for the mean.
    pub fn from_values(character: impl Into<String>, values: &[f64], franchise_size: usize) -> Self {
        let sum: f64 = values.iter().sum();
        Self {
            character: character.into(),
            mean_own_movies: sum / values.len() as f64,
            franchise_contribution: sum / franchise_size as f64,
        }
    }
}

/// Contribution scores for every row of a TF-IDF matrix, in row order
pub fn contributions(tf_idf: &Matrix<f64>, franchise_size: usize) -> Vec<ContributionScore> {
    (0..tf_idf.num_rows())
        .map(|row| {
            let values: Vec<f64> = tf_idf.present_in_row(row).copied().collect();
            ContributionScore::from_values(&tf_idf.characters()[row], &values, franchise_size)
        })
        .collect()
}

/// Sort by franchise contribution, descending.
///
/// The sort is stable: ties keep their incoming order.
pub fn rank(mut scores: Vec<ContributionScore>) -> Vec<ContributionScore> {
    scores.sort_by(|a, b| b.franchise_contribution.total_cmp(&a.franchise_contribution));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_contribution_divides_by_franchise_size() {
        let score = ContributionScore::from_values("x", &[0.2, 0.4], 23);
        assert!((score.mean_own_movies - 0.3).abs() < 1e-12);
        assert!((score.franchise_contribution - 0.6 / 23.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_values_mean_is_nan() {
        let score = ContributionScore::from_values("x", &[], 23);
        assert!(score.mean_own_movies.is_nan());
        assert_eq!(score.franchise_contribution, 0.0);
    }

    #[test]
    fn test_contributions_skip_absent_cells() {
        let mut m = Matrix::empty(labels(&["x"]), labels(&["m1", "m2", "m3"]));
        m.set(0, 0, Some(0.1));
        m.set(0, 2, Some(0.3));

        let scores = contributions(&m, 4);
        assert_eq!(scores.len(), 1);
        assert!((scores[0].mean_own_movies - 0.2).abs() < 1e-12);
        assert!((scores[0].franchise_contribution - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let scores = vec![
            ContributionScore::from_values("a", &[0.1], 1),
            ContributionScore::from_values("b", &[0.5], 1),
            ContributionScore::from_values("c", &[0.1], 1),
            ContributionScore::from_values("d", &[0.3], 1),
        ];

        let ranked: Vec<String> = rank(scores).into_iter().map(|s| s.character).collect();
        assert_eq!(ranked, vec!["b", "d", "a", "c"]);
    }
}
