//! Layer-sequence interpolation policies.
//!
//! Scalars interpolate linearly, but a layer sequence has no natural midpoint,
//! so the planner delegates to a named policy. Every policy returns the first
//! sequence at `t = 0`, the second at `t = 1`, and the shared sequence when
//! both endpoints agree.

use prm_core::rng::BlendRng;
use serde::{Deserialize, Serialize};

/// Strategy used to blend two layer sequences at interior parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlendPolicy {
    /// Switch wholesale from the first sequence to the second at `t = 0.5`.
    #[default]
    Threshold,
    /// Alternate positions: even indices from the first sequence, odd from the second.
    Interleave,
    /// Pick each position at random, favouring the first sequence by `1 - t`.
    Sampled {
        /// Master seed; `None` draws from OS entropy and is not reproducible.
        #[serde(default)]
        seed: Option<u64>,
    },
}

/// Per-plan blending state.
///
/// Holds the entropy generator for unseeded sampling so that one plan call
/// draws from a single stream.
#[derive(Debug)]
pub struct SequenceBlender<'a> {
    policy: &'a BlendPolicy,
    entropy: Option<BlendRng>,
}

impl<'a> SequenceBlender<'a> {
    /// Prepares a blender for one plan call.
    pub fn new(policy: &'a BlendPolicy) -> Self {
        let entropy = match policy {
            BlendPolicy::Sampled { seed: None } => Some(BlendRng::from_entropy()),
            _ => None,
        };
        Self { policy, entropy }
    }

    /// Blends `first` and `second` at parameter `t` for interpolation step `step`.
    pub fn blend(&mut self, first: &[String], second: &[String], t: f64, step: usize) -> Vec<String> {
        if t <= 0.0 || first == second {
            return first.to_vec();
        }
        if t >= 1.0 {
            return second.to_vec();
        }
        match self.policy {
            BlendPolicy::Threshold => {
                if t < 0.5 {
                    first.to_vec()
                } else {
                    second.to_vec()
                }
            }
            BlendPolicy::Interleave => positional(first, second, t, |idx| idx % 2 == 0),
            BlendPolicy::Sampled { seed: Some(seed) } => {
                let mut rng = BlendRng::for_step(*seed, step);
                positional(first, second, t, |_| rng.pick_first(1.0 - t))
            }
            BlendPolicy::Sampled { seed: None } => {
                let rng = self.entropy.get_or_insert_with(BlendRng::from_entropy);
                positional(first, second, t, |_| rng.pick_first(1.0 - t))
            }
        }
    }
}

/// Length-interpolated positional merge; `take_first(idx)` decides the source
/// and the other side fills in where the chosen one has run out.
fn positional<F>(first: &[String], second: &[String], t: f64, mut take_first: F) -> Vec<String>
where
    F: FnMut(usize) -> bool,
{
    let len_a = first.len() as f64;
    let len_b = second.len() as f64;
    let len = (len_a + (len_b - len_a) * t).round() as usize;
    let mut blended = Vec::with_capacity(len);
    for idx in 0..len {
        let token = match (first.get(idx), second.get(idx)) {
            (Some(a), Some(b)) => {
                if take_first(idx) {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        blended.push(token.clone());
    }
    blended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn interleave_alternates_positions() {
        let a = seq(&["Input", "Perception", "Analysis", "Output"]);
        let b = seq(&["Input", "Analysis", "Synthesis", "Output"]);
        let policy = BlendPolicy::Interleave;
        let mut blender = SequenceBlender::new(&policy);
        let mixed = blender.blend(&a, &b, 0.5, 2);
        assert_eq!(mixed, seq(&["Input", "Analysis", "Analysis", "Output"]));
    }

    #[test]
    fn positional_length_tracks_t() {
        let a = seq(&["Input", "Output"]);
        let b = seq(&["Input", "A", "B", "C", "Output", "Extra"]);
        let mixed = positional(&a, &b, 0.5, |_| true);
        assert_eq!(mixed, seq(&["Input", "Output", "B", "C"]));
    }

    #[test]
    fn endpoints_are_exact_for_every_policy() {
        let a = seq(&["Input", "Perception", "Output"]);
        let b = seq(&["Input", "Synthesis", "Output"]);
        for policy in [
            BlendPolicy::Threshold,
            BlendPolicy::Interleave,
            BlendPolicy::Sampled { seed: Some(3) },
            BlendPolicy::Sampled { seed: None },
        ] {
            let mut blender = SequenceBlender::new(&policy);
            assert_eq!(blender.blend(&a, &b, 0.0, 0), a);
            assert_eq!(blender.blend(&a, &b, 1.0, 5), b);
        }
    }
}
