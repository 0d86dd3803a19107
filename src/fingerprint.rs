//! Pulse-sequence fingerprinting.
//!
//! Reduces one captured IR transmission (a sequence of mark/space
//! durations) to a stable 32-bit fingerprint without decoding any
//! protocol. Each pulse is compared against the pulse two positions
//! later with a ±20% tolerance, yielding a ternary symbol; the symbol
//! stream is folded into an FNV-1a style hash. Two presses of the same
//! remote button produce the same relative-timing pattern even when the
//! absolute tick counts jitter, so they hash to the same value.
//!
//! This is deliberately not cryptographic — collisions between unrelated
//! remotes are possible and accepted.

/// FNV-32 offset basis. Also the degenerate result for sequences too
/// short to carry any timing relations.
pub const FNV_BASIS: u32 = 2_166_136_261;

/// FNV-32 prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Outcome of comparing a pulse against a later pulse with 20% tolerance.
///
/// The discriminants are the hash symbols and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PulseRelation {
    /// The new pulse is meaningfully shorter (`new < old * 0.8`).
    Shorter = 0,
    /// Within ±20% — treated as the same nominal duration.
    Equal = 1,
    /// The new pulse is meaningfully longer (`old < new * 0.8`).
    Longer = 2,
}

/// Tolerance comparator between two pulse durations.
///
/// Exact integer form of the 0.8 factor: `new < old * 0.8` becomes
/// `5 * new < 4 * old` in u32, which cannot overflow for u16 inputs.
/// Unlike a float threshold this makes the relation exactly
/// antisymmetric: `compare(a, b) == Longer` iff `compare(b, a) ==
/// Shorter`, with values landing on the 4:5 ratio itself reading as
/// `Equal` from both directions.
pub fn compare(old: u16, new: u16) -> PulseRelation {
    let old = u32::from(old);
    let new = u32::from(new);
    if 5 * new < 4 * old {
        PulseRelation::Shorter
    } else if 5 * old < 4 * new {
        PulseRelation::Longer
    } else {
        PulseRelation::Equal
    }
}

/// Hash a pulse sequence into its 32-bit fingerprint.
///
/// For each index `i` in `1..=len-3` the relation between `pulses[i]`
/// and `pulses[i + 2]` is folded in as
/// `hash = hash.wrapping_mul(FNV_PRIME) ^ symbol`. Index 0 is skipped:
/// the leading mark is the protocol header and its absolute length is
/// the least repeatable part of a capture. Comparing `i` with `i + 2`
/// keeps marks paired with marks and spaces with spaces.
///
/// Sequences shorter than 3 pulses carry no relations and return
/// [`FNV_BASIS`] unchanged.
pub fn fingerprint(pulses: &[u16]) -> u32 {
    let mut hash = FNV_BASIS;
    if pulses.len() < 3 {
        return hash;
    }
    for i in 1..=pulses.len() - 3 {
        let symbol = compare(pulses[i], pulses[i + 2]) as u8;
        hash = hash.wrapping_mul(FNV_PRIME) ^ u32::from(symbol);
    }
    hash
}
