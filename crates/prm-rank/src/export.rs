use std::collections::BTreeMap;

use chrono::Utc;
use prm_core::errors::{ErrorInfo, PrmError};
use prm_core::hash::stable_hash_string;
use prm_core::provenance::{Provenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::RankWeights;
use crate::normalize::NormalizedMetrics;
use crate::ranker::{
    group_by_reliability, PathRanker, RankedPath, Recommendation, ReliabilityTier,
};
use crate::stat::ConfidenceInterval;

/// Schema of [`RankingExport`] payloads.
pub const EXPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// One comparison row per ranked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    /// Dense rank.
    pub rank: usize,
    /// Path identifier.
    pub id: String,
    /// Composite score.
    pub composite_score: f64,
    /// Raw path probability.
    pub path_probability: f64,
    /// Raw total cost.
    pub total_cost: f64,
    /// Raw hop count.
    pub path_length: f64,
    /// Raw entropy.
    pub entropy: f64,
    /// Normalized metrics.
    pub normalized: NormalizedMetrics,
    /// Reliability tier.
    pub reliability: ReliabilityTier,
    /// Wilson interval.
    pub confidence95: ConfidenceInterval,
    /// Action classification.
    pub recommendation: Recommendation,
}

impl From<&RankedPath> for ExportRow {
    fn from(entry: &RankedPath) -> Self {
        let metrics = &entry.path.metrics;
        Self {
            rank: entry.rank,
            id: entry.path.id.clone(),
            composite_score: entry.composite_score,
            path_probability: metrics.path_probability,
            total_cost: metrics.total_cost,
            path_length: metrics.path_length,
            entropy: metrics.entropy,
            normalized: entry.normalized,
            reliability: entry.reliability.tier,
            confidence95: entry.confidence95,
            recommendation: entry.recommendation,
        }
    }
}

/// Aggregate view of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Number of rows.
    pub total: usize,
    /// Identifier of the rank 1 path.
    pub best_path: Option<String>,
    /// Mean composite score.
    pub mean_composite_score: f64,
    /// Path identifiers per reliability tier, in ranked order.
    pub reliability: BTreeMap<ReliabilityTier, Vec<String>>,
}

/// Serializable ranking snapshot for reporting surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingExport {
    /// Payload schema.
    pub schema_version: SchemaVersion,
    /// Input hash, timestamp and tool versions.
    pub provenance: Provenance,
    /// Weight set every row was scored with.
    pub weights: RankWeights,
    /// Rows in ranked order.
    pub rows: Vec<ExportRow>,
    /// Summary statistics.
    pub summary: ExportSummary,
    /// Stable hash of `rows`.
    pub digest: String,
}

/// Builds an export snapshot for `ranked`.
///
/// The rows must come from a single ranking: all entries share one weight set,
/// which is recorded as the snapshot's `weights`.
pub fn export(ranked: &[RankedPath]) -> Result<RankingExport, PrmError> {
    let weights = match ranked.first() {
        Some(first) => first.weights,
        None => {
            return Err(PrmError::Ranking(
                ErrorInfo::new("empty_path_set", "cannot export an empty ranking")
                    .with_hint("rank at least one path before exporting"),
            ))
        }
    };
    if let Some(other) = ranked.iter().find(|entry| entry.weights != weights) {
        return Err(PrmError::Ranking(
            ErrorInfo::new(
                "mixed_weight_sets",
                "ranked paths were scored with different weight sets",
            )
            .with_context("path", other.path.id.clone()),
        ));
    }

    let mut ordered: Vec<&RankedPath> = ranked.iter().collect();
    ordered.sort_by_key(|entry| entry.rank);
    let rows: Vec<ExportRow> = ordered.iter().map(|entry| ExportRow::from(*entry)).collect();

    let groups = group_by_reliability(ranked);
    let ids = |entries: &[RankedPath]| -> Vec<String> {
        let mut entries: Vec<&RankedPath> = entries.iter().collect();
        entries.sort_by_key(|entry| entry.rank);
        entries.iter().map(|entry| entry.path.id.clone()).collect()
    };
    let mut reliability = BTreeMap::new();
    reliability.insert(ReliabilityTier::High, ids(&groups.high));
    reliability.insert(ReliabilityTier::Medium, ids(&groups.medium));
    reliability.insert(ReliabilityTier::Low, ids(&groups.low));

    let mean_composite_score =
        rows.iter().map(|row| row.composite_score).sum::<f64>() / rows.len() as f64;
    let summary = ExportSummary {
        total: rows.len(),
        best_path: rows.first().map(|row| row.id.clone()),
        mean_composite_score,
        reliability,
    };

    let paths: Vec<_> = ordered.iter().map(|entry| &entry.path).collect();
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "prm-rank".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    let provenance = Provenance {
        input_hash: stable_hash_string(&paths)?,
        created_at: Utc::now().to_rfc3339(),
        tool_versions,
    };
    let digest = stable_hash_string(&rows)?;

    Ok(RankingExport {
        schema_version: EXPORT_SCHEMA,
        provenance,
        weights,
        rows,
        summary,
        digest,
    })
}

impl PathRanker {
    /// Exports `ranked` with the weight set it was scored under.
    pub fn export(&self, ranked: &[RankedPath]) -> Result<RankingExport, PrmError> {
        export(ranked)
    }
}
