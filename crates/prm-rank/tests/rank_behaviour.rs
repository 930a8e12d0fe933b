mod common;

use prm_rank::{
    filter, group_by_reliability, PathRanker, RankOptions, RankWeights, Recommendation,
    ReliabilityTier, Winner,
};

use common::{candidates, path};

#[test]
fn dominant_path_ranks_first() {
    let ranked = PathRanker::default()
        .rank(&candidates(), None)
        .expect("rank");
    let order: Vec<&str> = ranked.iter().map(|entry| entry.path.id.as_str()).collect();
    assert_eq!(order[0], "direct");
    assert_eq!(order[3], "detour");

    let best = &ranked[0];
    assert_eq!(best.reliability.tier, ReliabilityTier::High);
    assert_eq!(best.reliability.label, "High reliability");
    assert_eq!(best.recommendation, Recommendation::Recommend);
    assert!(best.confidence95.contains(0.91));

    let worst = &ranked[3];
    assert_eq!(worst.composite_score, 0.0);
    assert_eq!(worst.recommendation, Recommendation::Avoid);
}

#[test]
fn per_call_weights_override_defaults() {
    let paths = candidates();
    let ranker = PathRanker::default();
    let cost_only = RankOptions::with_weights(RankWeights::new(0.0, 1.0, 0.0, 0.0));
    let ranked = ranker.rank(&paths, Some(&cost_only)).expect("rank");
    assert_eq!(ranked[0].path.id, "cheap");
    assert_eq!(ranked[0].composite_score, 1.0);

    let default_ranked = ranker.rank(&paths, None).expect("rank");
    assert_eq!(default_ranked[0].path.id, "direct");
}

#[test]
fn ties_keep_input_order() {
    let paths = vec![
        path("first", 0.6, 100.0, 3.0, 0.2),
        path("second", 0.6, 100.0, 3.0, 0.2),
        path("third", 0.6, 100.0, 3.0, 0.2),
    ];
    let ranked = PathRanker::default().rank(&paths, None).expect("rank");
    let ids: Vec<&str> = ranked.iter().map(|entry| entry.path.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
    assert!(ranked.iter().all(|entry| (entry.composite_score - 0.5).abs() < 1e-12));
    assert_eq!(ranked[2].rank, 3);
}

#[test]
fn empty_input_is_an_error() {
    let err = PathRanker::default().rank(&[], None).expect_err("empty");
    assert_eq!(err.code(), "empty_path_set");
}

#[test]
fn invalid_weights_are_rejected() {
    let err = PathRanker::with_weights(RankWeights::new(-0.1, 0.3, 0.3, 0.3))
        .expect_err("negative weight");
    assert_eq!(err.code(), "invalid_weights");

    let bad = RankOptions::with_weights(RankWeights::new(f64::NAN, 0.3, 0.3, 0.3));
    let err = PathRanker::default()
        .rank(&candidates(), Some(&bad))
        .expect_err("nan weight");
    assert_eq!(err.code(), "invalid_weights");
}

#[test]
fn non_finite_metrics_are_rejected() {
    let paths = vec![path("ok", 0.5, 1.0, 1.0, 0.1), path("bad", f64::NAN, 1.0, 1.0, 0.1)];
    let err = PathRanker::default().rank(&paths, None).expect_err("nan");
    assert_eq!(err.code(), "non_finite_field");
}

#[test]
fn compare_reports_winner_and_significance() {
    let ranker = PathRanker::default();
    let strong = path("strong", 0.95, 100.0, 2.0, 0.1);
    let weak = path("weak", 0.30, 400.0, 6.0, 0.8);

    let cmp = ranker.compare(&weak, &strong).expect("compare");
    assert_eq!(cmp.winner, Winner::B);
    assert_eq!(cmp.winner.to_string(), "B");
    assert!((cmp.score_difference - 1.0).abs() < 1e-12);
    assert!(cmp.significant);
    assert_eq!(cmp.a.path.id, "weak");

    let cmp = ranker.compare(&strong, &strong.clone()).expect("compare");
    assert_eq!(cmp.winner, Winner::A);
    assert_eq!(cmp.score_difference, 0.0);
    assert!(!cmp.significant);
}

#[test]
fn filter_and_grouping_preserve_rank_order() {
    let ranked = PathRanker::default()
        .rank(&candidates(), None)
        .expect("rank");

    let kept = filter(&ranked, 0.5);
    assert!(kept.iter().all(|entry| entry.composite_score >= 0.5));
    assert!(kept.windows(2).all(|pair| pair[0].rank < pair[1].rank));
    assert!(filter(&ranked, 2.0).is_empty());
    assert_eq!(filter(&ranked, 0.0).len(), ranked.len());

    let groups = group_by_reliability(&ranked);
    let ids = |entries: &[prm_rank::RankedPath]| {
        entries
            .iter()
            .map(|entry| entry.path.id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&groups.high), vec!["direct"]);
    assert_eq!(ids(&groups.medium).len(), 2);
    assert_eq!(ids(&groups.low), vec!["detour"]);
}
