//! Min-max normalization across a candidate set.

use prm_core::{Path, PathMetrics};
use serde::{Deserialize, Serialize};

use crate::config::RankWeights;

/// Value assigned to every path when a metric has no spread.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Per-path metrics rescaled to `[0, 1]`, higher is better for all four.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    /// Normalized path probability.
    pub probability: f64,
    /// Inverted normalized total cost.
    pub cost: f64,
    /// Inverted normalized path length.
    pub length: f64,
    /// Inverted normalized entropy.
    pub entropy: f64,
}

impl NormalizedMetrics {
    /// Weighted sum of the four normalized values.
    pub fn composite(&self, weights: &RankWeights) -> f64 {
        weights.probability * self.probability
            + weights.cost * self.cost
            + weights.length * self.length
            + weights.entropy * self.entropy
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn over<F>(paths: &[Path], metric: F) -> Self
    where
        F: Fn(&PathMetrics) -> f64,
    {
        paths.iter().map(|path| metric(&path.metrics)).fold(
            Span {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |span, value| Span {
                min: span.min.min(value),
                max: span.max.max(value),
            },
        )
    }

    fn scale(&self, value: f64, invert: bool) -> f64 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return NEUTRAL_SCORE;
        }
        let scaled = ((value - self.min) / range).clamp(0.0, 1.0);
        if invert {
            1.0 - scaled
        } else {
            scaled
        }
    }
}

/// Normalizes every path against the min and max of the whole set.
pub fn normalize_all(paths: &[Path]) -> Vec<NormalizedMetrics> {
    let probability = Span::over(paths, |m| m.path_probability);
    let cost = Span::over(paths, |m| m.total_cost);
    let length = Span::over(paths, |m| m.path_length);
    let entropy = Span::over(paths, |m| m.entropy);

    paths
        .iter()
        .map(|path| {
            let m = &path.metrics;
            NormalizedMetrics {
                probability: probability.scale(m.path_probability, false),
                cost: cost.scale(m.total_cost, true),
                length: length.scale(m.path_length, true),
                entropy: entropy.scale(m.entropy, true),
            }
        })
        .collect()
}
