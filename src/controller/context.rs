//! Shared mutable context threaded through the controller logic.
//!
//! `ControllerContext` is the single struct the transition functions in
//! [`super`] read from and write to: the learned code, the live relay
//! timeout, output commands, and the two wrapping-millisecond
//! timestamps that drive every elapsed-time decision. The service
//! applies `commands` to the actual output drivers after each poll.

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Output commands (written by transition logic; applied by the service)
// ---------------------------------------------------------------------------

/// Desired output pin levels after a poll iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCommands {
    /// Relay energised.
    pub relay: bool,
    /// Status indicator lit. Mirrors the relay outside of acknowledge
    /// blinks, which the service performs directly.
    pub indicator: bool,
}

impl OutputCommands {
    /// Everything off — safe power-on default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// ControllerContext
// ---------------------------------------------------------------------------

/// The controller's complete mutable state.
pub struct ControllerContext {
    /// Fingerprint currently recognised as the activation signal.
    /// Loaded from storage at startup; whatever is stored (including
    /// zero on a fresh device) is used until the first learn action.
    pub learned_code: u32,

    /// How long the relay stays on after the last matching signal (ms).
    /// Always within `(0, timeout_ceiling_ms]` after startup clamping.
    pub timeout_ms: u32,

    /// Output pin commands; `commands.relay` is the relay state.
    pub commands: OutputCommands,

    /// Wrapping-ms timestamp of the last matching fingerprint, or of the
    /// last auto-off transition once the relay has dropped.
    pub last_match_ms: u32,

    /// Wrapping-ms timestamp of the last adjust-window fire.
    pub last_adjust_ms: u32,

    /// Tunable parameters.
    pub config: SystemConfig,
}

impl ControllerContext {
    /// Create a context with everything off and timing anchored at `now_ms`.
    ///
    /// `last_match_ms` is back-dated by one debounce window so the very
    /// first matching signal after power-up activates the relay
    /// immediately instead of waiting out the debounce.
    pub fn new(config: SystemConfig, learned_code: u32, timeout_ms: u32, now_ms: u32) -> Self {
        Self {
            learned_code,
            timeout_ms,
            commands: OutputCommands::all_off(),
            last_match_ms: now_ms.wrapping_sub(config.match_debounce_ms),
            last_adjust_ms: now_ms,
            config,
        }
    }

    /// Relay currently on.
    pub fn relay_on(&self) -> bool {
        self.commands.relay
    }

    /// Wrap-safe milliseconds since the last recorded match.
    pub fn since_last_match(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_match_ms)
    }
}
