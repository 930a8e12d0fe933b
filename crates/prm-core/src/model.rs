//! Configuration-space records shared by the planner and the ranker.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PrmError};

/// Token that must open every valid layer sequence.
pub const INPUT_LAYER: &str = "Input";
/// Token that must close every valid layer sequence.
pub const OUTPUT_LAYER: &str = "Output";

/// Categorical processing mode label (caller-defined, never interpolated).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProcessingMode(String);

impl ProcessingMode {
    /// Wraps a caller supplied label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessingMode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A point in the architecture design space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Opaque identifier; synthetic for interpolated waypoints.
    pub id: String,
    /// Ordered layer tokens; absent decodes as empty and fails [`Configuration::check_shape`].
    #[serde(default)]
    pub layer_sequence: Vec<String>,
    /// Confidence threshold, conventionally in `[0, 1]`.
    pub confidence_threshold: f64,
    /// Degree of parallel fan-out.
    pub parallelization_factor: u32,
    /// Categorical processing mode.
    #[serde(default)]
    pub processing_mode: ProcessingMode,
    /// Token budget consumed by the configuration.
    #[serde(default)]
    pub token_cost: f64,
}

impl Configuration {
    /// Creates a configuration with default mode and zero token cost.
    pub fn new(
        id: impl Into<String>,
        layers: &[&str],
        confidence_threshold: f64,
        parallelization_factor: u32,
    ) -> Self {
        Self {
            id: id.into(),
            layer_sequence: layers.iter().map(|layer| layer.to_string()).collect(),
            confidence_threshold,
            parallelization_factor,
            processing_mode: ProcessingMode::default(),
            token_cost: 0.0,
        }
    }

    /// Sets the processing mode.
    pub fn with_mode(mut self, mode: impl Into<ProcessingMode>) -> Self {
        self.processing_mode = mode.into();
        self
    }

    /// Sets the token cost.
    pub fn with_token_cost(mut self, token_cost: f64) -> Self {
        self.token_cost = token_cost;
        self
    }

    /// Rejects shapes no planner operation can reason about.
    ///
    /// An empty layer sequence is treated the same as an absent one.
    pub fn check_shape(&self) -> Result<(), PrmError> {
        if self.layer_sequence.is_empty() {
            return Err(PrmError::Model(
                ErrorInfo::new("missing_layer_sequence", "configuration has no layer sequence")
                    .with_context("id", self.id.clone()),
            ));
        }
        for (field, value) in [
            ("confidenceThreshold", self.confidence_threshold),
            ("tokenCost", self.token_cost),
        ] {
            if !value.is_finite() {
                return Err(non_finite(&self.id, field, value));
            }
        }
        Ok(())
    }
}

/// Optional architecture-wide limits; `None` means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Upper bound on `tokenCost`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<f64>,
    /// Lower bound on `confidenceThreshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence: Option<f64>,
}

/// Validity and cost context for a family of configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    /// Layers that must appear earlier than the keyed layer.
    #[serde(default)]
    pub layer_dependencies: BTreeMap<String, Vec<String>>,
    /// Optional limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

impl Architecture {
    /// Adds a dependency list for `layer`.
    pub fn with_dependency(mut self, layer: &str, requires: &[&str]) -> Self {
        self.layer_dependencies.insert(
            layer.to_string(),
            requires.iter().map(|dep| dep.to_string()).collect(),
        );
        self
    }

    /// Sets the constraint block.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Dependencies declared for `layer`, empty when unconstrained.
    pub fn dependencies_of(&self, layer: &str) -> &[String] {
        self.layer_dependencies
            .get(layer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Aggregate metrics computed by the roadmap builder for a full path.
///
/// `entropy` is opaque here; lower is read as more certain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetrics {
    /// Product of edge success probabilities.
    pub path_probability: f64,
    /// Sum of edge costs.
    pub total_cost: f64,
    /// Number of hops.
    pub path_length: f64,
    /// Externally computed uncertainty measure.
    pub entropy: f64,
}

/// A full candidate path handed to the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Caller identifier used in comparisons and exports.
    pub id: String,
    /// Ordered configurations along the path.
    #[serde(default)]
    pub configurations: Vec<Configuration>,
    /// Precomputed aggregate metrics.
    pub metrics: PathMetrics,
}

impl Path {
    /// Creates a path with metrics only.
    pub fn from_metrics(id: impl Into<String>, metrics: PathMetrics) -> Self {
        Self {
            id: id.into(),
            configurations: Vec::new(),
            metrics,
        }
    }

    /// Rejects non-finite metrics.
    pub fn check_metrics(&self) -> Result<(), PrmError> {
        let m = &self.metrics;
        for (field, value) in [
            ("pathProbability", m.path_probability),
            ("totalCost", m.total_cost),
            ("pathLength", m.path_length),
            ("entropy", m.entropy),
        ] {
            if !value.is_finite() {
                return Err(non_finite(&self.id, field, value));
            }
        }
        Ok(())
    }
}

fn non_finite(id: &str, field: &str, value: f64) -> PrmError {
    PrmError::Model(
        ErrorInfo::new("non_finite_field", "numeric field must be finite")
            .with_context("id", id.to_string())
            .with_context("field", field.to_string())
            .with_context("value", value.to_string()),
    )
}
