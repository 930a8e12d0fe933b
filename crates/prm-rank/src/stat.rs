//! Wilson score interval for a proportion.

use prm_core::errors::{ErrorInfo, PrmError};
use serde::{Deserialize, Serialize};

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.959_963_984_540_054;

/// Closed interval `[lower, upper]` within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Upper minus lower bound.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// 95% Wilson score interval treating `proportion` as observed over `trials`.
///
/// `proportion` is clamped to `[0, 1]`; zero trials are an error.
pub fn wilson_interval(proportion: f64, trials: u32) -> Result<ConfidenceInterval, PrmError> {
    if trials == 0 {
        return Err(PrmError::Stats(
            ErrorInfo::new("non_positive_trials", "wilson interval needs at least one trial")
                .with_hint("the ranker defaults to 100 pseudo trials"),
        ));
    }
    if !proportion.is_finite() {
        return Err(PrmError::Stats(
            ErrorInfo::new("non_finite_proportion", "proportion must be finite")
                .with_context("value", proportion.to_string()),
        ));
    }
    let p = proportion.clamp(0.0, 1.0);
    let n = trials as f64;
    let z2 = Z_95 * Z_95;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = Z_95 * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    Ok(ConfidenceInterval {
        lower: (center - margin).max(0.0),
        upper: (center + margin).min(1.0),
    })
}
