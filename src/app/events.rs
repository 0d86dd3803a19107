//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits
//! these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters on the other side decide what to do with them — the
//! production adapter logs to serial; a test sink records them.

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller started (carries the restored code and timeout).
    Started { learned_code: u32, timeout_ms: u32 },

    /// A complete transmission was received and fingerprinted.
    /// Emitted for every signal, matching or not — this is the debug
    /// observability feed.
    SignalReceived { stored: u32, received: u32 },

    /// The learn button was held while a signal arrived; its
    /// fingerprint is the new activation code.
    CodeLearned(u32),

    /// A matching signal turned the relay on (carries the active
    /// timeout window in ms).
    RelayOn(u32),

    /// The timeout elapsed with no matching signal; relay released.
    RelayOff,

    /// The adjust button grew the timeout by one step (new value, ms).
    TimeoutAdjusted(u32),

    /// An adjust past the ceiling rolled the timeout back to the floor
    /// (new value, ms).
    TimeoutReset(u32),
}
