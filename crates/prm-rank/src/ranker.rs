use std::fmt;

use prm_core::errors::{ErrorInfo, PrmError};
use prm_core::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{RankWeights, RankerConfig};
use crate::normalize::{normalize_all, NormalizedMetrics};
use crate::stat::{wilson_interval, ConfidenceInterval};

/// Score gap above which a pairwise comparison is reported as significant.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.1;

/// Coarse success-probability class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityTier {
    /// `pathProbability > 0.8`.
    High,
    /// `pathProbability > 0.5`.
    Medium,
    /// Everything else.
    Low,
}

impl ReliabilityTier {
    /// Classifies a raw path probability.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.8 {
            ReliabilityTier::High
        } else if probability > 0.5 {
            ReliabilityTier::Medium
        } else {
            ReliabilityTier::Low
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ReliabilityTier::High => "High reliability",
            ReliabilityTier::Medium => "Medium reliability",
            ReliabilityTier::Low => "Low reliability",
        }
    }
}

/// Tier plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reliability {
    /// Tier.
    pub tier: ReliabilityTier,
    /// Human readable label.
    pub label: String,
}

impl From<ReliabilityTier> for Reliability {
    fn from(tier: ReliabilityTier) -> Self {
        Self {
            tier,
            label: tier.label().to_string(),
        }
    }
}

/// Action classification for a ranked path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Score above 0.8 with high reliability.
    Recommend,
    /// Score above 0.6 without low reliability.
    Consider,
    /// Everything else.
    Avoid,
}

impl Recommendation {
    /// Classifies a composite score under a reliability tier.
    pub fn classify(composite_score: f64, tier: ReliabilityTier) -> Self {
        if composite_score > 0.8 && tier == ReliabilityTier::High {
            Recommendation::Recommend
        } else if composite_score > 0.6 && tier != ReliabilityTier::Low {
            Recommendation::Consider
        } else {
            Recommendation::Avoid
        }
    }
}

/// A path annotated with its normalized metrics, score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPath {
    /// The caller supplied path.
    #[serde(flatten)]
    pub path: Path,
    /// Position of the path in the ranked input.
    pub input_index: usize,
    /// Metrics normalized across the input set.
    pub normalized: NormalizedMetrics,
    /// Reliability tier of the raw path probability.
    pub reliability: Reliability,
    /// 95% Wilson interval around the path probability.
    pub confidence95: ConfidenceInterval,
    /// Weighted sum of the normalized metrics.
    pub composite_score: f64,
    /// Weight set that produced `composite_score`.
    pub weights: RankWeights,
    /// Dense rank, 1 is best.
    pub rank: usize,
    /// Action classification.
    pub recommendation: Recommendation,
}

/// Per-call overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RankOptions {
    /// Weight set replacing the ranker default for this call.
    #[serde(default)]
    pub weights: Option<RankWeights>,
}

impl RankOptions {
    /// Options carrying only a weight override.
    pub fn with_weights(weights: RankWeights) -> Self {
        Self {
            weights: Some(weights),
        }
    }
}

/// Label of the preferred path in a pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// The first path.
    A,
    /// The second path.
    B,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::A => f.write_str("A"),
            Winner::B => f.write_str("B"),
        }
    }
}

/// Result of ranking two paths against each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Preferred path; ties go to `A`.
    pub winner: Winner,
    /// Absolute composite score difference.
    pub score_difference: f64,
    /// Whether the difference exceeds [`SIGNIFICANCE_THRESHOLD`].
    pub significant: bool,
    /// Ranked view of the first path.
    pub a: RankedPath,
    /// Ranked view of the second path.
    pub b: RankedPath,
}

/// Ranked paths split by reliability tier, each in ranked order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReliabilityGroups {
    /// High tier paths.
    pub high: Vec<RankedPath>,
    /// Medium tier paths.
    pub medium: Vec<RankedPath>,
    /// Low tier paths.
    pub low: Vec<RankedPath>,
}

/// Multi-criteria path ranker.
///
/// Holds only immutable options and can be shared freely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathRanker {
    config: RankerConfig,
}

impl PathRanker {
    /// Builds a ranker from validated options.
    pub fn new(config: RankerConfig) -> Result<Self, PrmError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builds a ranker with the given default weights.
    pub fn with_weights(weights: RankWeights) -> Result<Self, PrmError> {
        Self::new(RankerConfig {
            weights,
            ..RankerConfig::default()
        })
    }

    /// Options the ranker was built with.
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Default weight set.
    pub fn weights(&self) -> &RankWeights {
        &self.config.weights
    }

    /// Normalizes, scores, classifies and ranks `paths`.
    ///
    /// Output is sorted by non-increasing composite score; ties keep input order.
    pub fn rank(
        &self,
        paths: &[Path],
        options: Option<&RankOptions>,
    ) -> Result<Vec<RankedPath>, PrmError> {
        let weights = options
            .and_then(|opts| opts.weights)
            .unwrap_or(self.config.weights);
        weights.validate()?;
        if paths.is_empty() {
            return Err(PrmError::Ranking(
                ErrorInfo::new("empty_path_set", "cannot rank an empty set of paths")
                    .with_hint("the roadmap builder produced no candidate paths"),
            ));
        }
        for path in paths {
            path.check_metrics()?;
        }

        let normalized = normalize_all(paths);
        let mut ranked = Vec::with_capacity(paths.len());
        for (input_index, (path, normalized)) in paths.iter().zip(normalized).enumerate() {
            let probability = path.metrics.path_probability;
            let tier = ReliabilityTier::from_probability(probability);
            let composite_score = normalized.composite(&weights);
            ranked.push(RankedPath {
                path: path.clone(),
                input_index,
                normalized,
                reliability: tier.into(),
                confidence95: wilson_interval(probability, self.config.trials)?,
                composite_score,
                weights,
                rank: 0,
                recommendation: Recommendation::classify(composite_score, tier),
            });
        }

        ranked.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
        for (idx, entry) in ranked.iter_mut().enumerate() {
            entry.rank = idx + 1;
        }
        debug!(
            paths = ranked.len(),
            best = %ranked[0].path.id,
            best_score = ranked[0].composite_score,
            "ranked candidate paths"
        );
        Ok(ranked)
    }

    /// Ranks the pair `(a, b)` and reports the winner.
    pub fn compare(&self, a: &Path, b: &Path) -> Result<Comparison, PrmError> {
        let ranked = self.rank(&[a.clone(), b.clone()], None)?;
        let mut first = None;
        let mut second = None;
        for entry in ranked {
            if entry.input_index == 0 {
                first = Some(entry);
            } else {
                second = Some(entry);
            }
        }
        let (a, b) = match (first, second) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(PrmError::Ranking(ErrorInfo::new(
                    "comparison_incomplete",
                    "pairwise ranking lost a path",
                )))
            }
        };
        let winner = if a.rank < b.rank { Winner::A } else { Winner::B };
        let score_difference = (a.composite_score - b.composite_score).abs();
        Ok(Comparison {
            winner,
            score_difference,
            significant: score_difference > SIGNIFICANCE_THRESHOLD,
            a,
            b,
        })
    }

    /// Wilson interval using the configured trial count.
    pub fn confidence_interval(&self, probability: f64) -> Result<ConfidenceInterval, PrmError> {
        wilson_interval(probability, self.config.trials)
    }
}

/// Keeps ranked paths whose composite score is at least `min_score`.
pub fn filter(ranked: &[RankedPath], min_score: f64) -> Vec<RankedPath> {
    ranked
        .iter()
        .filter(|entry| entry.composite_score >= min_score)
        .cloned()
        .collect()
}

/// Splits ranked paths by reliability tier, preserving order.
pub fn group_by_reliability(ranked: &[RankedPath]) -> ReliabilityGroups {
    let mut groups = ReliabilityGroups::default();
    for entry in ranked {
        let bucket = match entry.reliability.tier {
            ReliabilityTier::High => &mut groups.high,
            ReliabilityTier::Medium => &mut groups.medium,
            ReliabilityTier::Low => &mut groups.low,
        };
        bucket.push(entry.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_use_strict_thresholds() {
        assert_eq!(ReliabilityTier::from_probability(0.81), ReliabilityTier::High);
        assert_eq!(ReliabilityTier::from_probability(0.8), ReliabilityTier::Medium);
        assert_eq!(ReliabilityTier::from_probability(0.5), ReliabilityTier::Low);
    }

    #[test]
    fn recommendation_requires_tier_and_score() {
        assert_eq!(
            Recommendation::classify(0.85, ReliabilityTier::High),
            Recommendation::Recommend
        );
        assert_eq!(
            Recommendation::classify(0.85, ReliabilityTier::Medium),
            Recommendation::Consider
        );
        assert_eq!(
            Recommendation::classify(0.95, ReliabilityTier::Low),
            Recommendation::Avoid
        );
        assert_eq!(
            Recommendation::classify(0.6, ReliabilityTier::High),
            Recommendation::Avoid
        );
    }
}
