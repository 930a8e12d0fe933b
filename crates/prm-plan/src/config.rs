use std::path::Path;

use prm_core::errors::{ErrorInfo, PrmError};
use prm_core::serde::load_yaml;
use serde::{Deserialize, Serialize};

use crate::blend::BlendPolicy;

/// YAML-configurable options fixed at planner construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Number of interpolation intervals; a plan yields `steps + 1` waypoints.
    #[serde(default = "default_interpolation_steps")]
    pub interpolation_steps: usize,
    /// Whether intermediate waypoints are validated against the architecture.
    #[serde(default = "default_collision_check")]
    pub collision_check_enabled: bool,
    /// Accumulated cost above which a transition is rejected.
    #[serde(default = "default_max_transition_cost")]
    pub max_transition_cost: f64,
    /// Default distance gate for [`crate::LocalPlanner::can_connect_default`].
    #[serde(default = "default_max_connect_distance")]
    pub max_connect_distance: f64,
    /// Layer-sequence blending strategy.
    #[serde(default)]
    pub blend: BlendPolicy,
}

fn default_interpolation_steps() -> usize {
    5
}

fn default_collision_check() -> bool {
    true
}

fn default_max_transition_cost() -> f64 {
    500.0
}

fn default_max_connect_distance() -> f64 {
    50.0
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            interpolation_steps: default_interpolation_steps(),
            collision_check_enabled: default_collision_check(),
            max_transition_cost: default_max_transition_cost(),
            max_connect_distance: default_max_connect_distance(),
            blend: BlendPolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Checks the options before a planner is built from them.
    pub fn validate(&self) -> Result<(), PrmError> {
        if self.interpolation_steps == 0 {
            return Err(PrmError::Config(
                ErrorInfo::new(
                    "invalid_interpolation_steps",
                    "interpolation_steps must be at least 1",
                )
                .with_hint("use the default of 5"),
            ));
        }
        for (field, value) in [
            ("max_transition_cost", self.max_transition_cost),
            ("max_connect_distance", self.max_connect_distance),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(PrmError::Config(
                    ErrorInfo::new("invalid_limit", "limits must be non-negative")
                        .with_context("field", field)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        Ok(())
    }
}

/// Loads and validates planner options from a YAML file.
pub fn load_planner_config(path: &Path) -> Result<PlannerConfig, PrmError> {
    let config: PlannerConfig = load_yaml(path)?;
    config.validate()?;
    Ok(config)
}
