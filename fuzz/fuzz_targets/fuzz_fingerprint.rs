//! Fuzz target: `fingerprint::fingerprint` (pulse-train hashing)
//!
//! Reinterprets arbitrary fuzz bytes as a pulse-duration sequence and
//! checks the hashing surface that faces raw RMT ringbuffer data.
//!
//! Invariants checked:
//! - No panics under any duration sequence, any length
//! - Hashing is deterministic
//! - The leading pulse never influences the result
//!
//! cargo fuzz run fuzz_fingerprint

#![no_main]

use irlatch::fingerprint::{fingerprint, FNV_BASIS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let pulses: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    let hash = fingerprint(&pulses);
    assert_eq!(hash, fingerprint(&pulses), "hash must be deterministic");

    if pulses.len() < 3 {
        assert_eq!(hash, FNV_BASIS, "short sequences hash to the basis");
    } else {
        let mut altered = pulses.clone();
        altered[0] = altered[0].wrapping_add(1);
        assert_eq!(
            hash,
            fingerprint(&altered),
            "leading pulse must not affect the hash"
        );
    }
});
