use prm_core::errors::PrmError;
use prm_core::{Architecture, Configuration};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::blend::SequenceBlender;
use crate::config::PlannerConfig;
use crate::transition::{configuration_distance, transition_cost, transition_probability};
use crate::validity::first_violation;

/// Outcome of planning a single edge between two configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResult {
    /// Interpolated waypoints; empty unless the transition is valid.
    pub waypoints: Vec<Configuration>,
    /// Accumulated transition cost up to the point evaluation stopped.
    pub cost: f64,
    /// Product of per-step success probabilities, in `[0, 1]`.
    pub probability: f64,
    /// Whether every checked waypoint was valid and the cost stayed in budget.
    pub is_valid: bool,
    /// Number of waypoints interpolated, regardless of validity.
    pub num_steps: usize,
}

/// Local connection planner.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalPlanner {
    config: PlannerConfig,
}

impl LocalPlanner {
    /// Builds a planner from validated options.
    pub fn new(config: PlannerConfig) -> Result<Self, PrmError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Options the planner was built with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Interpolates `interpolation_steps + 1` waypoints from `a` to `b`.
    pub fn interpolate(
        &self,
        a: &Configuration,
        b: &Configuration,
    ) -> Result<Vec<Configuration>, PrmError> {
        a.check_shape()?;
        b.check_shape()?;
        Ok(self.interpolate_unchecked(a, b))
    }

    fn interpolate_unchecked(&self, a: &Configuration, b: &Configuration) -> Vec<Configuration> {
        let steps = self.config.interpolation_steps;
        let mut blender = SequenceBlender::new(&self.config.blend);
        (0..=steps)
            .map(|step| {
                let t = step as f64 / steps as f64;
                let parallel = lerp(
                    a.parallelization_factor as f64,
                    b.parallelization_factor as f64,
                    t,
                )
                .round()
                .max(0.0) as u32;
                Configuration {
                    id: format!("{}->{}#{}", a.id, b.id, step),
                    layer_sequence: blender.blend(&a.layer_sequence, &b.layer_sequence, t, step),
                    confidence_threshold: lerp(a.confidence_threshold, b.confidence_threshold, t),
                    parallelization_factor: parallel,
                    processing_mode: if t < 0.5 {
                        a.processing_mode.clone()
                    } else {
                        b.processing_mode.clone()
                    },
                    token_cost: lerp(a.token_cost, b.token_cost, t),
                }
            })
            .collect()
    }

    /// Plans, validates and costs the transition from `a` to `b`.
    pub fn plan(
        &self,
        a: &Configuration,
        b: &Configuration,
        architecture: &Architecture,
    ) -> Result<TransitionResult, PrmError> {
        let waypoints = self.interpolate(a, b)?;
        let num_steps = waypoints.len();
        let mut cost = 0.0;
        let mut probability = 1.0;

        for (idx, pair) in waypoints.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            if self.config.collision_check_enabled {
                if let Some(violation) = first_violation(from, architecture) {
                    debug!(
                        from = %a.id,
                        to = %b.id,
                        step = idx,
                        ?violation,
                        "transition rejected by validity check"
                    );
                    return Ok(rejected(cost, probability, num_steps));
                }
            }

            cost += transition_cost(from, to);
            probability *= transition_probability(from, to, architecture);
            trace!(step = idx, cost, probability, "evaluated waypoint pair");

            if cost > self.config.max_transition_cost {
                debug!(
                    from = %a.id,
                    to = %b.id,
                    step = idx,
                    cost,
                    limit = self.config.max_transition_cost,
                    "transition rejected by cost budget"
                );
                return Ok(rejected(cost, probability, num_steps));
            }
        }

        Ok(TransitionResult {
            waypoints,
            cost,
            probability: probability.clamp(0.0, 1.0),
            is_valid: true,
            num_steps,
        })
    }

    /// Whether `a` and `b` are close enough to attempt a local plan.
    pub fn can_connect(
        &self,
        a: &Configuration,
        b: &Configuration,
        max_distance: f64,
    ) -> Result<bool, PrmError> {
        a.check_shape()?;
        b.check_shape()?;
        Ok(configuration_distance(a, b) <= max_distance)
    }

    /// [`Self::can_connect`] with the configured default distance gate.
    pub fn can_connect_default(
        &self,
        a: &Configuration,
        b: &Configuration,
    ) -> Result<bool, PrmError> {
        self.can_connect(a, b, self.config.max_connect_distance)
    }

    /// Greedy shortcutting over an existing waypoint sequence.
    ///
    /// From the current waypoint, candidates are scanned from the last index
    /// down to `current + 2`; the first one reachable by a valid in-budget plan
    /// wins. Otherwise the cursor advances by one. The cursor strictly
    /// increases, so the loop runs at most `len` times.
    pub fn optimize_path(
        &self,
        waypoints: &[Configuration],
        architecture: &Architecture,
    ) -> Result<Vec<Configuration>, PrmError> {
        for waypoint in waypoints {
            waypoint.check_shape()?;
        }
        if waypoints.len() <= 2 {
            return Ok(waypoints.to_vec());
        }

        let last = waypoints.len() - 1;
        let mut optimized = vec![waypoints[0].clone()];
        let mut current = 0;
        while current < last {
            let mut next = current + 1;
            for candidate in (current + 2..=last).rev() {
                let result = self.plan(&waypoints[current], &waypoints[candidate], architecture)?;
                if result.is_valid && result.cost <= self.config.max_transition_cost {
                    debug!(from = current, to = candidate, cost = result.cost, "shortcut accepted");
                    next = candidate;
                    break;
                }
            }
            optimized.push(waypoints[next].clone());
            current = next;
        }
        Ok(optimized)
    }
}

fn rejected(cost: f64, probability: f64, num_steps: usize) -> TransitionResult {
    TransitionResult {
        waypoints: Vec::new(),
        cost,
        probability: probability.clamp(0.0, 1.0),
        is_valid: false,
        num_steps,
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
