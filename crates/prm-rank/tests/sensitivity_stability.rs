mod common;

use prm_rank::{PathRanker, RankWeights};

use common::{candidates, path};

#[test]
fn repeating_baseline_weights_is_fully_stable() {
    let ranker = PathRanker::default();
    let weights = *ranker.weights();
    let report = ranker
        .sensitivity_analysis(&candidates(), &[weights, weights])
        .expect("sensitivity");
    assert_eq!(report.variants.len(), 2);
    assert!(report
        .variants
        .iter()
        .all(|variant| variant.max_change == 0));
    assert_eq!(report.stability, 1.0);
    assert_eq!(report.baseline_weights, weights);
}

#[test]
fn no_variations_reports_full_stability() {
    let report = PathRanker::default()
        .sensitivity_analysis(&candidates(), &[])
        .expect("sensitivity");
    assert!(report.variants.is_empty());
    assert_eq!(report.stability, 1.0);
    assert_eq!(report.baseline.len(), 4);
}

#[test]
fn opposing_weights_move_paths() {
    // "safe" wins on probability, "cheap" wins on everything else.
    let paths = vec![
        path("safe", 0.95, 400.0, 6.0, 0.8),
        path("cheap", 0.30, 50.0, 2.0, 0.1),
    ];
    let ranker = PathRanker::with_weights(RankWeights::new(1.0, 0.0, 0.0, 0.0)).expect("ranker");
    let report = ranker
        .sensitivity_analysis(&paths, &[RankWeights::new(0.0, 1.0, 0.0, 0.0)])
        .expect("sensitivity");

    let variant = &report.variants[0];
    assert_eq!(variant.max_change, 1);
    assert_eq!(variant.changes[0].path_id, "safe");
    assert_eq!(variant.changes[0].baseline_rank, 1);
    assert_eq!(variant.changes[0].variant_rank, 2);
    assert_eq!(variant.changes[0].change, -1);
    assert_eq!(variant.changes[1].change, 1);
    assert!((report.stability - 0.9).abs() < 1e-12);
}

#[test]
fn invalid_variation_aborts_the_analysis() {
    let err = PathRanker::default()
        .sensitivity_analysis(&candidates(), &[RankWeights::new(0.2, -1.0, 0.2, 0.2)])
        .expect_err("negative weight");
    assert_eq!(err.code(), "invalid_weights");
}
