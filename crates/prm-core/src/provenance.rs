//! Version and origin stamps for exported snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `major.minor.patch` version of a serialized payload layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when readers of the previous layout break.
    pub major: u32,
    /// Bumped when fields are added.
    pub minor: u32,
    /// Bumped for fixes that keep the layout.
    pub patch: u32,
}

impl SchemaVersion {
    /// Builds a version triple.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        SchemaVersion {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::new(1, 0, 0)
    }
}

/// Origin of an exported snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Digest of the inputs the snapshot was computed from.
    pub input_hash: String,
    /// RFC 3339 UTC creation time; excluded from digests.
    pub created_at: String,
    /// Crate name to version for every crate that touched the snapshot.
    pub tool_versions: BTreeMap<String, String>,
}
