//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (IR capture, buttons, relay/indicator, storage,
//! clock, event sinks) implement these traits. The
//! [`ControllerService`](super::service::ControllerService) consumes
//! them via generics, so the domain core never touches hardware
//! directly and every test runs on the host against mocks.

use crate::config::SystemConfig;

/// Upper bound on pulses per captured transmission. Long protocol
/// frames (NEC extended, air-conditioner remotes) stay well under this.
pub const MAX_PULSES: usize = 128;

/// One captured IR transmission: alternating mark/space durations in
/// device ticks, in arrival order. Fixed capacity — no heap on the
/// capture path.
pub type PulseSeq = heapless::Vec<u16, MAX_PULSES>;

// ───────────────────────────────────────────────────────────────
// IR capture port (driven adapter: demodulator → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking access to the IR capture hardware.
///
/// Implementations must tolerate being polled at arbitrary frequency.
pub trait IrReceiverPort {
    /// Take the completed transmission, if one has been captured since
    /// the last [`resume`](Self::resume). Returns `None` while capture
    /// is idle or in progress.
    fn try_receive(&mut self) -> Option<PulseSeq>;

    /// Re-arm the capture hardware for the next transmission. Called
    /// once after every consumed sequence.
    fn resume(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Button inputs (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Instantaneous button levels. Both buttons are momentary, active-low
/// with pull-ups; implementations return the *logical* pressed state.
pub trait InputPort {
    /// Learn button held right now.
    fn learn_pressed(&mut self) -> bool;

    /// Timeout-adjust button held right now.
    fn adjust_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Relay / indicator outputs (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the two outputs.
pub trait OutputPort {
    /// Energise or release the relay.
    fn set_relay(&mut self, on: bool);

    /// Light or extinguish the status indicator.
    fn set_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic wrapping millisecond clock plus the blocking delay used by
/// the acknowledge blink. All elapsed-time comparisons against
/// [`now_ms`](Self::now_ms) must use `wrapping_sub`.
pub trait ClockPort {
    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Block for `ms` milliseconds. Stalls the whole control loop —
    /// only the short indicator blink goes through here.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Byte store port (driven adapter: domain ↔ NVS / EEPROM)
// ───────────────────────────────────────────────────────────────

/// Byte-addressable persistent storage, EEPROM-style.
///
/// The settings codec addresses two fixed, non-overlapping offsets (see
/// [`crate::settings`]). A write is durable once it returns `Ok`;
/// nothing is guaranteed about atomicity across separate writes.
pub trait ByteStore {
    /// Read up to `buf.len()` bytes starting at `offset`. Returns the
    /// number of bytes read; unwritten storage reads as zeroes.
    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write `data` starting at `offset`.
    fn write_at(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the tunables blob.
///
/// Implementations MUST validate before persisting. Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently
/// clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go — the production
/// adapter writes them to the serial log.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ByteStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Offset or length falls outside the storage region.
    OutOfBounds,
    /// Storage partition is full.
    Full,
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "offset out of bounds"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
