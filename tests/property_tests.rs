//! Property-based tests using proptest

use franchise_tfidf::pipeline::NoopObserver;
use franchise_tfidf::rank::{contributions, rank, ContributionScore};
use franchise_tfidf::stats::{document_frequency, inverse_document_frequency};
use franchise_tfidf::*;
use proptest::prelude::*;

/// Appearances over `movies` movies for characters `c0..cN`, with times
/// drawn from a mix of valid and invalid shapes.
fn appearances_strategy() -> impl Strategy<Value = (usize, Vec<RawAppearance>)> {
    (1usize..8).prop_flat_map(|movies| {
        let cell = (
            0usize..12,
            0..movies,
            prop_oneof![
                (0u32..200, 0u32..60).prop_map(|(m, s)| format!("{m}:{s:02}")),
                (0u32..60).prop_map(|s| format!(":{s}")),
                (1u32..200).prop_map(|m| m.to_string()),
                Just("n/a".to_string()),
            ],
        );
        (
            Just(movies),
            prop::collection::vec(cell, 0..40).prop_map(|cells| {
                cells
                    .into_iter()
                    .map(|(c, m, t)| RawAppearance::new(format!("M{m}"), format!("c{c}"), t))
                    .collect()
            }),
        )
    })
}

fn allow_all() -> AllowList {
    AllowList::from_pairs((0..12).map(|i| (format!("c{i}"), format!("c{i}"))))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_parse_minutes_never_negative(raw in ".{0,12}") {
        if let Some(minutes) = parse_minutes(&raw) {
            prop_assert!(minutes >= 0.0);
            prop_assert!(minutes.is_finite());
        }
    }

    #[test]
    fn test_parse_minutes_seconds_shape(m in 0u32..1000, s in 0u32..60) {
        let parsed = parse_minutes(&format!("{m}:{s}")).unwrap();
        prop_assert!((parsed - (m as f64 + s as f64 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_invariants((movies, appearances) in appearances_strategy()) {
        let titles: Vec<String> = (0..movies).map(|m| format!("M{m}")).collect();
        let lengths: MovieLengths = titles.iter().map(|t| (t.clone(), 120)).collect();
        let config = TfIdfConfig::default().with_franchise_size(movies);
        let pipeline = Pipeline::new(config, allow_all()).unwrap();

        let out = pipeline
            .run_appearances(&titles, &appearances, &lengths, &mut NoopObserver)
            .unwrap();

        // DF >= 1 for every surviving character
        prop_assert!(out.statistics.document_frequency.values().iter().all(|&df| df >= 1));

        // Absent screen time <=> absent TF-IDF
        for row in 0..out.screen_time.num_rows() {
            for col in 0..out.screen_time.num_columns() {
                prop_assert_eq!(
                    out.screen_time.get(row, col).is_some(),
                    out.tf_idf().get(row, col).is_some()
                );
            }
        }

        // Ranking is sorted and covers every character
        prop_assert_eq!(out.ranking.len(), out.screen_time.num_rows());
        for pair in out.ranking.windows(2) {
            prop_assert!(pair[0].franchise_contribution >= pair[1].franchise_contribution);
        }
    }

    #[test]
    fn test_idf_matches_formula(k in 1usize..23, n in 23usize..40) {
        let mut m: Matrix<f64> = Matrix::empty(
            vec!["x".to_string()],
            (0..n).map(|i| format!("M{i}")).collect(),
        );
        for col in 0..k {
            m.set(0, col, Some(1.0));
        }

        let df = document_frequency(&m);
        prop_assert_eq!(df.get("x"), Some(&k));
        let idf = inverse_document_frequency(&df, n).unwrap();
        prop_assert!((idf.get("x").unwrap() - (n as f64 / k as f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_contribution_ignores_own_movie_count(
        values in prop::collection::vec(0.0f64..1.0, 1..10),
        n in 10usize..30,
    ) {
        let score = ContributionScore::from_values("x", &values, n);
        let sum: f64 = values.iter().sum();
        prop_assert!((score.franchise_contribution - sum / n as f64).abs() < 1e-12);
        prop_assert!((score.mean_own_movies - sum / values.len() as f64).abs() < 1e-12);
    }

    #[test]
    fn test_rank_is_stable(scores in prop::collection::vec(0u8..4, 0..20)) {
        let mut m: Matrix<f64> = Matrix::empty(
            (0..scores.len()).map(|i| format!("c{i}")).collect(),
            vec!["M0".to_string()],
        );
        for (row, &s) in scores.iter().enumerate() {
            m.set(row, 0, Some(s as f64));
        }

        let ranked = rank(contributions(&m, 1));
        for pair in ranked.windows(2) {
            if pair[0].franchise_contribution == pair[1].franchise_contribution {
                let a: usize = pair[0].character[1..].parse().unwrap();
                let b: usize = pair[1].character[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}
