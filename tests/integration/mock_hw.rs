//! Mock hardware adapter for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real GPIO or the RMT peripheral.

use irlatch::app::events::AppEvent;
use irlatch::app::ports::{
    ClockPort, EventSink, InputPort, IrReceiverPort, OutputPort, PulseSeq,
};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Relay(bool),
    Indicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub learn_held: bool,
    pub adjust_held: bool,
    pub pending: Option<PulseSeq>,
    pub calls: Vec<OutputCall>,
    pub resume_count: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            learn_held: false,
            adjust_held: false,
            pending: None,
            calls: Vec::new(),
            resume_count: 0,
        }
    }

    /// Queue one captured transmission for the next `try_receive`.
    pub fn inject(&mut self, pulses: &[u16]) {
        self.pending = Some(PulseSeq::from_slice(pulses).unwrap());
    }

    /// Last commanded relay level (off if never commanded).
    pub fn relay_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Relay(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Last commanded indicator level (off if never commanded).
    pub fn indicator_lit(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Indicator(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Count of off→on relay transitions across the recorded history.
    pub fn relay_rising_edges(&self) -> usize {
        let mut edges = 0;
        let mut level = false;
        for call in &self.calls {
            if let OutputCall::Relay(on) = call {
                if *on && !level {
                    edges += 1;
                }
                level = *on;
            }
        }
        edges
    }
}

impl InputPort for MockHardware {
    fn learn_pressed(&mut self) -> bool {
        self.learn_held
    }

    fn adjust_pressed(&mut self) -> bool {
        self.adjust_held
    }
}

impl OutputPort for MockHardware {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(OutputCall::Relay(on));
    }

    fn set_indicator(&mut self, on: bool) {
        self.calls.push(OutputCall::Indicator(on));
    }
}

impl IrReceiverPort for MockHardware {
    fn try_receive(&mut self) -> Option<PulseSeq> {
        self.pending.take()
    }

    fn resume(&mut self) {
        self.resume_count += 1;
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Hand-cranked clock. `delay_ms` advances time so the blocking ack
/// blink is observable in tests.
pub struct MockClock {
    pub now: u32,
}

#[allow(dead_code)]
impl MockClock {
    pub fn at(now: u32) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that records every emitted event for assertions.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count_relay_on(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::RelayOn(_)))
            .count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
