#![deny(missing_docs)]
#![doc = "Local connection planner: interpolates between two architecture configurations, validates and costs each step, and shortcuts waypoint sequences."]

pub mod blend;
/// YAML configuration schema and defaults.
pub mod config;
/// The planner and its transition result.
pub mod planner;
pub mod transition;
/// Architecture validity rules.
pub mod validity;

pub use blend::{BlendPolicy, SequenceBlender};
pub use config::{load_planner_config, PlannerConfig};
pub use planner::{LocalPlanner, TransitionResult};
pub use transition::{
    configuration_distance, jaccard_similarity, transition_cost, transition_probability,
};
pub use validity::{first_violation, is_valid, Violation};
