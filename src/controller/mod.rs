//! Controller transition logic.
//!
//! The controller is a polled state machine with two observable states
//! (relay off = Idle, relay on = Active) and two transient user actions
//! (learning a code, adjusting the timeout). Each poll iteration the
//! service runs three checks, in order, against current readings:
//!
//! ```text
//!   1. adjust_timeout   — adjust button sampled once per repeat window
//!   2. handle_signal    — fingerprint arrived: learn / match / debounce
//!   3. auto_off         — relay on longer than timeout since last match
//! ```
//!
//! Every function here is pure over [`ControllerContext`] plus a
//! wrapping-millisecond `now` — no I/O, no clock reads — so the whole
//! state machine is unit-testable on the host with hand-rolled
//! timelines. All elapsed-time math is `now.wrapping_sub(then)`, which
//! stays correct across the u32 wraparound boundary.

pub mod context;

use context::ControllerContext;
use log::{debug, info};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of one adjust-window fire with the button pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustAction {
    /// Timeout grew by one step; carries the new value (ms).
    Incremented(u32),
    /// The increment would have exceeded the ceiling, so the timeout was
    /// reset to the floor instead of clamped. Carries the floor (ms).
    Reset(u32),
}

/// What a received fingerprint did to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalOutcome {
    /// The learn button was held: the code was stored as the new
    /// activation signal. Learning never activates the relay.
    pub learned: bool,
    /// The fingerprint equals the learned code.
    pub matched: bool,
    /// The match flipped the relay from off to on this iteration.
    pub relay_turned_on: bool,
}

// ---------------------------------------------------------------------------
// 1. Timeout adjustment
// ---------------------------------------------------------------------------

/// Sample the adjust button once per repeat window.
///
/// The window re-arms on every fire whether or not the button was
/// pressed, so a held button increments exactly once per
/// `adjust_repeat_ms` and a fresh press registers within one window.
/// An increment that would exceed the ceiling resets the timeout to the
/// floor — a deliberate rollover, not a clamp.
///
/// Returns `None` when the window has not elapsed or the button was up.
/// The caller persists the new value and blinks the acknowledgment.
pub fn adjust_timeout(
    ctx: &mut ControllerContext,
    now_ms: u32,
    pressed: bool,
) -> Option<AdjustAction> {
    if now_ms.wrapping_sub(ctx.last_adjust_ms) < ctx.config.adjust_repeat_ms {
        return None;
    }
    ctx.last_adjust_ms = now_ms;

    if !pressed {
        return None;
    }

    let next = ctx.timeout_ms.saturating_add(ctx.config.timeout_step_ms);
    let action = if next > ctx.config.timeout_ceiling_ms {
        ctx.timeout_ms = ctx.config.timeout_floor_ms;
        AdjustAction::Reset(ctx.timeout_ms)
    } else {
        ctx.timeout_ms = next;
        AdjustAction::Incremented(next)
    };
    info!("timeout adjusted to {}ms ({:?})", ctx.timeout_ms, action);
    Some(action)
}

// ---------------------------------------------------------------------------
// 2. Signal handling
// ---------------------------------------------------------------------------

/// Process one received fingerprint.
///
/// Learn takes precedence: with the learn button held the code is
/// stored and nothing is activated, so a learn press can never slam the
/// relay on. Otherwise a code equal to the learned one always refreshes
/// `last_match_ms` — that refresh is what keeps the relay alive while a
/// remote button is held and its code repeats every ~100ms — but only
/// flips the relay on when it is currently off and at least one
/// debounce window has passed since the previous match.
pub fn handle_signal(
    ctx: &mut ControllerContext,
    now_ms: u32,
    code: u32,
    learn_pressed: bool,
) -> SignalOutcome {
    let mut outcome = SignalOutcome::default();

    if learn_pressed {
        ctx.learned_code = code;
        outcome.learned = true;
        info!("learned code {:#010x}", code);
        return outcome;
    }

    if code == ctx.learned_code {
        outcome.matched = true;
        if !ctx.commands.relay && ctx.since_last_match(now_ms) >= ctx.config.match_debounce_ms {
            ctx.commands.relay = true;
            ctx.commands.indicator = true;
            outcome.relay_turned_on = true;
            info!("match {:#010x} -> relay on for {}ms", code, ctx.timeout_ms);
        }
        ctx.last_match_ms = now_ms;
    } else {
        debug!(
            "ignoring code {:#010x} (learned {:#010x})",
            code, ctx.learned_code
        );
    }

    outcome
}

// ---------------------------------------------------------------------------
// 3. Relay auto-off
// ---------------------------------------------------------------------------

/// Drop the relay once the timeout has elapsed with no matching signal.
///
/// `last_match_ms` is refreshed to `now_ms` as the off-transition
/// marker. Returns `true` on the off transition.
pub fn auto_off(ctx: &mut ControllerContext, now_ms: u32) -> bool {
    if !ctx.commands.relay || ctx.since_last_match(now_ms) <= ctx.timeout_ms {
        return false;
    }
    ctx.commands.relay = false;
    ctx.commands.indicator = false;
    ctx.last_match_ms = now_ms;
    info!("relay off ({}ms timeout elapsed)", ctx.timeout_ms);
    true
}
