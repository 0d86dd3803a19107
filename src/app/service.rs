//! Application service — the hexagonal core.
//!
//! [`ControllerService`] owns the controller context and runs one poll
//! iteration at a time against injected ports, making the entire
//! learn/match/auto-off pipeline testable with mock adapters.
//!
//! ```text
//!  IrReceiverPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  InputPort      ──▶ │    ControllerService      │ ──▶ ByteStore
//!  ClockPort      ──▶ │  fingerprint · controller │
//!  OutputPort     ◀── └──────────────────────────┘
//! ```
//!
//! The loop has no fixed frame rate; `poll` performs the three checks
//! of the control cycle (timeout adjust, signal reception, relay
//! auto-off) statelessly against current readings. The only blocking
//! section is the 200ms/200ms acknowledge blink, which intentionally
//! stalls the loop — a short, accepted latency cost.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::controller::context::ControllerContext;
use crate::controller::{self, AdjustAction};
use crate::fingerprint;
use crate::settings::{self, Settings};

use super::events::AppEvent;
use super::ports::{ByteStore, ClockPort, EventSink, InputPort, IrReceiverPort, OutputPort};

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

/// Orchestrates all domain logic for the relay controller.
pub struct ControllerService {
    ctx: ControllerContext,
}

impl ControllerService {
    /// Construct the service from configuration and restored settings,
    /// with timing anchored at `now_ms`.
    ///
    /// Does **not** touch any output — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, restored: Settings, now_ms: u32) -> Self {
        Self {
            ctx: ControllerContext::new(config, restored.learned_code, restored.timeout_ms, now_ms),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive both outputs to their safe off state and announce startup.
    pub fn start(&mut self, hw: &mut impl OutputPort, sink: &mut impl EventSink) {
        self.apply_outputs(hw);
        sink.emit(&AppEvent::Started {
            learned_code: self.ctx.learned_code,
            timeout_ms: self.ctx.timeout_ms,
        });
        info!(
            "controller started: code={:#010x} timeout={}ms",
            self.ctx.learned_code, self.ctx.timeout_ms
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one control cycle.
    ///
    /// The `hw` parameter satisfies the input, output and IR-capture
    /// ports at once — this avoids a triple mutable borrow while
    /// keeping the port boundary explicit.
    pub fn poll(
        &mut self,
        hw: &mut (impl InputPort + OutputPort + IrReceiverPort),
        clock: &mut impl ClockPort,
        store: &mut impl ByteStore,
        sink: &mut impl EventSink,
    ) {
        // 1. Timeout adjustment
        let adjust_pressed = hw.adjust_pressed();
        if let Some(action) =
            controller::adjust_timeout(&mut self.ctx, clock.now_ms(), adjust_pressed)
        {
            if let Err(e) = settings::save_timeout_ms(store, self.ctx.timeout_ms) {
                warn!("timeout persist failed: {}", e);
            }
            sink.emit(&match action {
                AdjustAction::Incremented(ms) => AppEvent::TimeoutAdjusted(ms),
                AdjustAction::Reset(ms) => AppEvent::TimeoutReset(ms),
            });
            self.blink_ack(hw, clock);
        }

        // 2. Signal reception
        if let Some(pulses) = hw.try_receive() {
            let code = fingerprint::fingerprint(&pulses);
            let learn_pressed = hw.learn_pressed();
            let outcome =
                controller::handle_signal(&mut self.ctx, clock.now_ms(), code, learn_pressed);

            if outcome.learned {
                if let Err(e) = settings::save_code(store, self.ctx.learned_code) {
                    warn!("code persist failed: {}", e);
                }
                sink.emit(&AppEvent::CodeLearned(code));
                self.blink_ack(hw, clock);
            }
            if outcome.relay_turned_on {
                self.apply_outputs(hw);
                sink.emit(&AppEvent::RelayOn(self.ctx.timeout_ms));
            }

            sink.emit(&AppEvent::SignalReceived {
                stored: self.ctx.learned_code,
                received: code,
            });
            hw.resume();
        }

        // 3. Relay auto-off
        if controller::auto_off(&mut self.ctx, clock.now_ms()) {
            sink.emit(&AppEvent::RelayOff);
        }

        // Commands are idempotent; re-assert them every cycle so a
        // glitched output pin self-heals within one poll.
        self.apply_outputs(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Fingerprint currently recognised as the activation signal.
    pub fn learned_code(&self) -> u32 {
        self.ctx.learned_code
    }

    /// Live relay timeout (ms).
    pub fn timeout_ms(&self) -> u32 {
        self.ctx.timeout_ms
    }

    /// Relay currently energised.
    pub fn relay_on(&self) -> bool {
        self.ctx.relay_on()
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_outputs(&self, hw: &mut impl OutputPort) {
        hw.set_relay(self.ctx.commands.relay);
        hw.set_indicator(self.ctx.commands.indicator);
    }

    /// Synchronous acknowledge blink: on, off, then restore whatever
    /// the indicator should currently show. Blocks the loop for
    /// `blink_on_ms + blink_off_ms`.
    fn blink_ack(&self, hw: &mut impl OutputPort, clock: &mut impl ClockPort) {
        hw.set_indicator(true);
        clock.delay_ms(self.ctx.config.blink_on_ms);
        hw.set_indicator(false);
        clock.delay_ms(self.ctx.config.blink_off_ms);
        hw.set_indicator(self.ctx.commands.indicator);
    }
}
