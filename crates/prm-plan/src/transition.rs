//! Pairwise cost, success probability and distance between configurations.
//!
//! Weights are fixed; callers that need another weighting post-process the
//! returned values.

use std::collections::BTreeSet;

use prm_core::{Architecture, Configuration};

use crate::validity::is_valid;

/// Cost charged for every adjacent waypoint pair.
pub const BASE_TRANSITION_COST: f64 = 10.0;
/// Cost per layer of length difference.
pub const LAYER_DELTA_COST: f64 = 5.0;
/// Cost charged when the processing mode switches.
pub const MODE_SWITCH_COST: f64 = 15.0;
/// Cost per unit of confidence-threshold difference.
pub const CONFIDENCE_DELTA_COST: f64 = 20.0;

/// Distance weight on the relative layer-count difference.
pub const LAYER_DISTANCE_WEIGHT: f64 = 10.0;
/// Distance weight on the confidence-threshold difference.
pub const CONFIDENCE_DISTANCE_WEIGHT: f64 = 20.0;
/// Distance weight on the scaled parallelization difference.
pub const PARALLEL_DISTANCE_WEIGHT: f64 = 5.0;
/// Divisor applied to the parallelization difference before weighting.
pub const PARALLEL_DISTANCE_SCALE: f64 = 4.0;

/// Rate of the exponential decay applied to distance.
pub const PROBABILITY_DECAY_RATE: f64 = 0.1;
/// Factor applied when the destination waypoint is valid.
pub const VALID_TARGET_BONUS: f64 = 1.1;
/// Factor applied when the destination waypoint is invalid.
pub const INVALID_TARGET_PENALTY: f64 = 0.1;

fn length_delta(a: &Configuration, b: &Configuration) -> f64 {
    a.layer_sequence.len().abs_diff(b.layer_sequence.len()) as f64
}

/// Weighted configuration distance.
pub fn configuration_distance(a: &Configuration, b: &Configuration) -> f64 {
    let longest = a.layer_sequence.len().max(b.layer_sequence.len()).max(1) as f64;
    let layer_term = length_delta(a, b) / longest;
    let confidence_term = (a.confidence_threshold - b.confidence_threshold).abs();
    let parallel_term =
        a.parallelization_factor.abs_diff(b.parallelization_factor) as f64 / PARALLEL_DISTANCE_SCALE;

    LAYER_DISTANCE_WEIGHT * layer_term
        + CONFIDENCE_DISTANCE_WEIGHT * confidence_term
        + PARALLEL_DISTANCE_WEIGHT * parallel_term
}

/// Cost of stepping from `from` to `to`; always at least [`BASE_TRANSITION_COST`].
pub fn transition_cost(from: &Configuration, to: &Configuration) -> f64 {
    let mut cost = BASE_TRANSITION_COST;
    cost += LAYER_DELTA_COST * length_delta(from, to);
    if from.processing_mode != to.processing_mode {
        cost += MODE_SWITCH_COST;
    }
    cost += CONFIDENCE_DELTA_COST * (from.confidence_threshold - to.confidence_threshold).abs();
    cost
}

/// Intersection over union of the two layer sets. Two empty sets score 1.
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let left: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let right: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    let union = left.union(&right).count();
    if union == 0 {
        return 1.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

/// Estimated probability that the step from `from` to `to` succeeds, in `[0, 1]`.
pub fn transition_probability(
    from: &Configuration,
    to: &Configuration,
    architecture: &Architecture,
) -> f64 {
    let mut probability = 1.0;
    probability *= (-PROBABILITY_DECAY_RATE * configuration_distance(from, to)).exp();
    probability *= if is_valid(to, architecture) {
        VALID_TARGET_BONUS
    } else {
        INVALID_TARGET_PENALTY
    };
    probability *= jaccard_similarity(&from.layer_sequence, &to.layer_sequence);
    probability.clamp(0.0, 1.0)
}
