use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::PrmError;
use crate::serde::to_canonical_json_bytes;

/// Lowercase hex SHA-256 of `bytes`.
pub fn digest_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Digest of the canonical JSON form of `value`; independent of map key order.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, PrmError> {
    Ok(digest_hex(&to_canonical_json_bytes(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn key_order_does_not_change_the_digest() {
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();
        for (idx, key) in ["Input", "Analysis", "Output"].iter().enumerate() {
            forward.insert(*key, idx);
        }
        for (idx, key) in ["Output", "Analysis", "Input"].iter().enumerate() {
            backward.insert(*key, 2 - idx);
        }
        let a = stable_hash_string(&forward).unwrap();
        let b = stable_hash_string(&backward).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
