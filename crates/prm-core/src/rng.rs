//! Deterministic blend randomness and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Random source used by sampled sequence blending.
///
/// Seeded handles are reproducible: a waypoint at interpolation step `k` of a
/// plan seeded with `s` always draws from `derive_substream_seed(s, k)`.
/// Entropy handles exist for callers that want distinct roadmap edges from
/// repeated calls and accept non-reproducible output.
#[derive(Debug, Clone)]
pub struct BlendRng {
    rng: StdRng,
}

impl BlendRng {
    /// Creates a handle from an explicit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle used for a single interpolation step.
    pub fn for_step(master_seed: u64, step: usize) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, step as u64))
    }

    /// Creates a handle seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Returns `true` with probability `p_first` (clamped to `[0, 1]`).
    pub fn pick_first(&mut self, p_first: f64) -> bool {
        let p = if p_first.is_finite() {
            p_first.clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.rng.gen_bool(p)
    }
}

/// Derives the deterministic seed for a specific substream.
///
/// Hashes `(master_seed, substream)` with SipHash-1-3 under fixed zero keys,
/// which is stable across platforms and releases.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
