//! Random payload generation for insert phases.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::BenchError;

/// Length in hex characters of the payload inserted into every row.
pub const PAYLOAD_LEN: usize = 64;

/// Generate `len` hexadecimal characters from `len / 2` bytes of OS entropy.
///
/// `len` must be even. Payload generation is load-bearing for every insert
/// phase, so an entropy failure surfaces as an error instead of a degraded
/// payload.
pub fn random_hex(len: usize) -> Result<String, BenchError> {
    debug_assert!(len % 2 == 0, "payload length must be even");
    let mut bytes = vec![0u8; len / 2];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| BenchError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_has_requested_length() {
        let payload = random_hex(PAYLOAD_LEN).expect("generate");
        assert_eq!(payload.len(), PAYLOAD_LEN);
    }

    #[test]
    fn payload_is_lowercase_hex() {
        let payload = random_hex(64).expect("generate");
        assert!(payload.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn consecutive_payloads_differ() {
        let a = random_hex(64).expect("generate");
        let b = random_hex(64).expect("generate");
        assert_ne!(a, b);
    }

    #[test]
    fn zero_length_payload_is_empty() {
        assert_eq!(random_hex(0).expect("generate"), "");
    }
}
