#![deny(missing_docs)]
#![doc = "Path ranker: min-max normalization, weighted composite scoring, Wilson confidence intervals, weight sensitivity analysis and export snapshots for candidate architecture paths."]

/// YAML configuration schema and defaults.
pub mod config;
/// Serializable ranking snapshots.
pub mod export;
pub mod normalize;
/// Scoring, ranking and post-processing.
pub mod ranker;
pub mod sensitivity;
pub mod stat;

pub use config::{load_ranker_config, RankWeights, RankerConfig};
pub use export::{export, ExportRow, ExportSummary, RankingExport};
pub use normalize::{normalize_all, NormalizedMetrics, NEUTRAL_SCORE};
pub use ranker::{
    filter, group_by_reliability, Comparison, PathRanker, RankOptions, RankedPath,
    Recommendation, Reliability, ReliabilityGroups, ReliabilityTier, Winner,
    SIGNIFICANCE_THRESHOLD,
};
pub use sensitivity::{RankChange, SensitivityReport, VariantResult};
pub use stat::{wilson_interval, ConfidenceInterval};
