use std::path::Path;

use prm_core::errors::{ErrorInfo, PrmError};
use prm_core::serde::load_yaml;
use serde::{Deserialize, Serialize};

/// Non-negative coefficients of the composite score.
///
/// They need not sum to one; scores are only comparable within one weight set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankWeights {
    /// Weight on normalized path probability.
    #[serde(default = "default_probability_weight")]
    pub probability: f64,
    /// Weight on inverted normalized cost.
    #[serde(default = "default_cost_weight")]
    pub cost: f64,
    /// Weight on inverted normalized length.
    #[serde(default = "default_length_weight")]
    pub length: f64,
    /// Weight on inverted normalized entropy.
    #[serde(default = "default_entropy_weight")]
    pub entropy: f64,
}

fn default_probability_weight() -> f64 {
    0.35
}

fn default_cost_weight() -> f64 {
    0.30
}

fn default_length_weight() -> f64 {
    0.15
}

fn default_entropy_weight() -> f64 {
    0.20
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            probability: default_probability_weight(),
            cost: default_cost_weight(),
            length: default_length_weight(),
            entropy: default_entropy_weight(),
        }
    }
}

impl RankWeights {
    /// Creates a weight set in `probability, cost, length, entropy` order.
    pub const fn new(probability: f64, cost: f64, length: f64, entropy: f64) -> Self {
        Self {
            probability,
            cost,
            length,
            entropy,
        }
    }

    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<(), PrmError> {
        for (name, value) in [
            ("probability", self.probability),
            ("cost", self.cost),
            ("length", self.length),
            ("entropy", self.entropy),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PrmError::Config(
                    ErrorInfo::new("invalid_weights", "weights must be finite and non-negative")
                        .with_context("weight", name)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        Ok(())
    }
}

/// YAML-configurable ranker options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Default weight set.
    #[serde(default)]
    pub weights: RankWeights,
    /// Pseudo trial count behind the Wilson interval.
    #[serde(default = "default_trials")]
    pub trials: u32,
}

fn default_trials() -> u32 {
    100
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: RankWeights::default(),
            trials: default_trials(),
        }
    }
}

impl RankerConfig {
    /// Checks the options before a ranker is built from them.
    pub fn validate(&self) -> Result<(), PrmError> {
        self.weights.validate()?;
        if self.trials == 0 {
            return Err(PrmError::Config(ErrorInfo::new(
                "non_positive_trials",
                "trials must be at least 1",
            )));
        }
        Ok(())
    }
}

/// Loads and validates ranker options from a YAML file.
pub fn load_ranker_config(path: &Path) -> Result<RankerConfig, PrmError> {
    let config: RankerConfig = load_yaml(path)?;
    config.validate()?;
    Ok(config)
}
