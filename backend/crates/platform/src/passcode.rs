//! Passcode Verification
//!
//! The instructor passcode is a deployment secret compared on every
//! privileged request. Comparison runs over SHA-256 digests in constant
//! time, so neither the length nor a matching prefix of the configured
//! passcode leaks through timing.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Verify a presented passcode against the expected one
pub fn verify_passcode(presented: &str, expected: &str) -> bool {
    constant_time_eq(
        &sha256(presented.as_bytes()),
        &sha256(expected.as_bytes()),
    )
}
