//! Content checksum used for drift detection.
//!
//! The value is the first 8 bytes of the SHA-256 digest of the raw script,
//! read big-endian. It is stable within Feathermig but not meant to match
//! checksums written by other migration tools.

use sha2::{Digest, Sha256};

/// Compute the 64-bit checksum of a script's raw content
pub fn compute_checksum(script: &str) -> u64 {
    let digest = Sha256::digest(script.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
