//! GPIO / peripheral pin assignments for the IRLatch main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// IR receiver (TSOP38238 demodulator, 38 kHz carrier)
// ---------------------------------------------------------------------------

/// Demodulated IR input. Idle HIGH, marks pull it LOW.
pub const IR_RX_GPIO: i32 = 4;

/// RMT channel used for pulse capture.
pub const IR_RMT_CHANNEL: u32 = 0;

// ---------------------------------------------------------------------------
// Relay output (opto-isolated module, active HIGH)
// ---------------------------------------------------------------------------

pub const RELAY_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Status indicator LED (active HIGH)
// ---------------------------------------------------------------------------

pub const INDICATOR_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// User buttons (momentary, active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Hold while a signal arrives to learn that signal's code.
pub const LEARN_BUTTON_GPIO: i32 = 7;

/// Press (or hold) to increase the relay timeout in 1 s steps.
pub const ADJUST_BUTTON_GPIO: i32 = 8;
