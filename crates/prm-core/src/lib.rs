#![deny(missing_docs)]
#![doc = "Configuration model, structured errors and deterministic helpers shared by the PRM local planner and path ranker."]

pub mod errors;
/// Stable hashing of serializable values.
pub mod hash;
pub mod model;
pub mod provenance;
pub mod rng;
pub mod serde;

pub use errors::{ErrorInfo, PrmError};
pub use hash::stable_hash_string;
pub use model::{
    Architecture, Configuration, Constraints, Path, PathMetrics, ProcessingMode, INPUT_LAYER,
    OUTPUT_LAYER,
};
pub use provenance::{Provenance, SchemaVersion};
pub use rng::{derive_substream_seed, BlendRng};
