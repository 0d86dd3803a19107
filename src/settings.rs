//! Persisted settings: learned code and relay timeout.
//!
//! Two independent little-endian `u32`s at fixed, non-overlapping byte
//! offsets in the [`ByteStore`] — no schema version, no checksum, and
//! deliberately no atomicity across the pair: power loss between a code
//! write and a timeout write leaves one of them stale, which this
//! system tolerates. Each value is written immediately when the user
//! action that changes it happens.
//!
//! The learned code is taken at face value: a fresh device reads zeroes
//! and the controller simply recognises code `0x00000000` until the
//! first learn action overwrites it. The timeout, being safety-ish, is
//! range-checked at load and silently corrected to the configured
//! default when the stored value is zero or above the ceiling.

use log::warn;

use crate::app::ports::{ByteStore, StorageError};
use crate::config::SystemConfig;

/// Byte offset of the learned code (4 bytes, LE).
pub const CODE_OFFSET: usize = 0;

/// Byte offset of the relay timeout in ms (4 bytes, LE).
pub const TIMEOUT_OFFSET: usize = 100;

/// The two persisted scalars, as restored at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub learned_code: u32,
    pub timeout_ms: u32,
}

impl Settings {
    /// Restore both values, applying the timeout range correction.
    pub fn load(store: &impl ByteStore, config: &SystemConfig) -> Self {
        Self {
            learned_code: load_code(store),
            timeout_ms: load_timeout_ms(store, config),
        }
    }
}

/// Read the learned code; unreadable storage degrades to zero.
pub fn load_code(store: &impl ByteStore) -> u32 {
    read_u32(store, CODE_OFFSET).unwrap_or(0)
}

/// Persist the learned code.
pub fn save_code(store: &mut impl ByteStore, code: u32) -> Result<(), StorageError> {
    store.write_at(CODE_OFFSET, &code.to_le_bytes())
}

/// Read the relay timeout, corrected into `(0, ceiling]`.
///
/// Zero (fresh storage) and values above the ceiling (corrupt or from a
/// build with different bounds) both fall back to the default — there
/// is no clamping to the nearest bound.
pub fn load_timeout_ms(store: &impl ByteStore, config: &SystemConfig) -> u32 {
    let raw = read_u32(store, TIMEOUT_OFFSET).unwrap_or(0);
    if raw == 0 || raw > config.timeout_ceiling_ms {
        if raw != 0 {
            warn!(
                "stored timeout {}ms out of range, using {}ms",
                raw, config.timeout_default_ms
            );
        }
        config.timeout_default_ms
    } else {
        raw
    }
}

/// Persist the relay timeout.
pub fn save_timeout_ms(store: &mut impl ByteStore, timeout_ms: u32) -> Result<(), StorageError> {
    store.write_at(TIMEOUT_OFFSET, &timeout_ms.to_le_bytes())
}

fn read_u32(store: &impl ByteStore, offset: usize) -> Option<u32> {
    let mut buf = [0u8; 4];
    match store.read_at(offset, &mut buf) {
        Ok(4) => Some(u32::from_le_bytes(buf)),
        Ok(_) => None,
        Err(e) => {
            warn!("settings read at offset {} failed: {}", offset, e);
            None
        }
    }
}
