//! How strongly the ordering depends on the choice of weights.

use prm_core::errors::PrmError;
use prm_core::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RankWeights;
use crate::ranker::{PathRanker, RankOptions, RankedPath};

/// Average max rank change at which stability reaches zero.
pub const STABILITY_SCALE: f64 = 10.0;

/// Rank movement of one path under one weight variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankChange {
    /// Path identifier.
    pub path_id: String,
    /// Position of the path in the input.
    pub input_index: usize,
    /// Rank under the ranker's own weights.
    pub baseline_rank: usize,
    /// Rank under the variant weights.
    pub variant_rank: usize,
    /// `baseline_rank - variant_rank`; positive means the path moved up.
    pub change: i64,
}

/// Outcome of re-ranking under one alternative weight set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResult {
    /// Weights used for this variant.
    pub weights: RankWeights,
    /// Per-path movements in input order.
    pub changes: Vec<RankChange>,
    /// Largest absolute movement.
    pub max_change: u64,
}

/// Full sensitivity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityReport {
    /// Baseline weights.
    pub baseline_weights: RankWeights,
    /// Baseline ranking.
    pub baseline: Vec<RankedPath>,
    /// One entry per supplied variation, in order.
    pub variants: Vec<VariantResult>,
    /// `max(0, 1 - mean(maxChange) / 10)`; 1 when there are no variants.
    pub stability: f64,
}

fn ranks_by_input(ranked: &[RankedPath]) -> Vec<usize> {
    let mut ranks = vec![0; ranked.len()];
    for entry in ranked {
        ranks[entry.input_index] = entry.rank;
    }
    ranks
}

impl PathRanker {
    /// Re-ranks `paths` under each of `variations` and measures rank movement.
    pub fn sensitivity_analysis(
        &self,
        paths: &[Path],
        variations: &[RankWeights],
    ) -> Result<SensitivityReport, PrmError> {
        let baseline = self.rank(paths, None)?;
        let baseline_ranks = ranks_by_input(&baseline);

        let mut variants = Vec::with_capacity(variations.len());
        for weights in variations {
            let ranked = self.rank(paths, Some(&RankOptions::with_weights(*weights)))?;
            let variant_ranks = ranks_by_input(&ranked);
            let changes: Vec<RankChange> = paths
                .iter()
                .enumerate()
                .map(|(idx, path)| RankChange {
                    path_id: path.id.clone(),
                    input_index: idx,
                    baseline_rank: baseline_ranks[idx],
                    variant_rank: variant_ranks[idx],
                    change: baseline_ranks[idx] as i64 - variant_ranks[idx] as i64,
                })
                .collect();
            let max_change = changes
                .iter()
                .map(|change| change.change.unsigned_abs())
                .max()
                .unwrap_or(0);
            variants.push(VariantResult {
                weights: *weights,
                changes,
                max_change,
            });
        }

        let stability = if variants.is_empty() {
            1.0
        } else {
            let mean = variants.iter().map(|v| v.max_change as f64).sum::<f64>()
                / variants.len() as f64;
            (1.0 - mean / STABILITY_SCALE).max(0.0)
        };
        debug!(variants = variants.len(), stability, "sensitivity analysis complete");

        Ok(SensitivityReport {
            baseline_weights: *self.weights(),
            baseline,
            variants,
            stability,
        })
    }
}
