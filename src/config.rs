//! System configuration parameters
//!
//! All tunable parameters for the IRLatch controller. The compiled-in
//! defaults are what ships; a validated override can be persisted in
//! NVS (there is no runtime configuration UI — the two buttons remain
//! the only user controls).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Relay timeout ---
    /// Effective timeout when the persisted value is absent or invalid (ms)
    pub timeout_default_ms: u32,
    /// Lowest valid relay timeout; also the fallback value when an
    /// increment would exceed the ceiling (ms)
    pub timeout_floor_ms: u32,
    /// Highest valid relay timeout (ms)
    pub timeout_ceiling_ms: u32,
    /// Amount added per adjust-button action (ms)
    pub timeout_step_ms: u32,

    // --- Input timing ---
    /// Minimum interval between two adjust-button actions (ms)
    pub adjust_repeat_ms: u32,
    /// Minimum gap since the last match before the relay re-triggers (ms).
    /// Absorbs remotes that repeat their code every ~100ms while held.
    pub match_debounce_ms: u32,

    // --- Indicator ---
    /// Acknowledge blink: indicator on duration (ms)
    pub blink_on_ms: u32,
    /// Acknowledge blink: indicator off duration (ms)
    pub blink_off_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Relay timeout bounds
            timeout_default_ms: 5_000,
            timeout_floor_ms: 1_000,
            timeout_ceiling_ms: 10_000,
            timeout_step_ms: 1_000,

            // Input timing
            adjust_repeat_ms: 1_000,
            match_debounce_ms: 250,

            // Indicator
            blink_on_ms: 200,
            blink_off_ms: 200,
        }
    }
}
