//! Integration tests for the ControllerService → controller → outputs
//! pipeline.
//!
//! These run on the host (x86_64) and verify that the full chain from a
//! captured pulse train down to a relay command works correctly without
//! any real hardware.

use crate::mock_hw::{LogSink, MockClock, MockHardware};

use irlatch::adapters::nvs::NvsAdapter;
use irlatch::app::events::AppEvent;
use irlatch::app::ports::PulseSeq;
use irlatch::app::service::ControllerService;
use irlatch::config::SystemConfig;
use irlatch::fingerprint;
use irlatch::settings::Settings;

// NEC-style pulse trains captured at 1µs ticks. BUTTON_B flips one data
// bit relative to BUTTON_A.
const BUTTON_A: &[u16] = &[
    9000, 4500, 560, 560, 560, 1690, 560, 560, 560, 1690, 560, 560, 560, 560, 560, 1690, 560, 560,
];
const BUTTON_B: &[u16] = &[
    9000, 4500, 560, 560, 560, 1690, 560, 560, 560, 1690, 560, 1690, 560, 560, 560, 1690, 560, 560,
];

fn code_of(pulses: &[u16]) -> u32 {
    fingerprint::fingerprint(&PulseSeq::from_slice(pulses).unwrap())
}

fn make_service(learned_code: u32, timeout_ms: u32, now: u32) -> ControllerService {
    let restored = Settings {
        learned_code,
        timeout_ms,
    };
    ControllerService::new(SystemConfig::default(), restored, now)
}

// ── Learn → match → auto-off, end to end ─────────────────────

#[test]
fn learn_then_match_then_auto_off() {
    let mut svc = make_service(0, 5_000, 1_000_000);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(1_000_000);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    svc.start(&mut hw, &mut sink);
    assert!(!hw.relay_on());

    // Hold learn and send BUTTON_A: the code is stored, nothing fires.
    hw.learn_held = true;
    hw.inject(BUTTON_A);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);

    let learned = code_of(BUTTON_A);
    assert_eq!(svc.learned_code(), learned);
    assert!(sink.contains(&AppEvent::CodeLearned(learned)));
    assert!(!hw.relay_on(), "learning must not activate the relay");
    assert_eq!(hw.resume_count, 1, "capture re-armed after consumption");

    // Release learn, send BUTTON_A again: relay turns on.
    hw.learn_held = false;
    clock.advance(500);
    hw.inject(BUTTON_A);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);

    assert!(hw.relay_on());
    assert!(hw.indicator_lit());
    assert!(sink.contains(&AppEvent::RelayOn(5_000)));

    // No signal for longer than the timeout: relay drops.
    clock.advance(5_001);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);

    assert!(!hw.relay_on());
    assert!(!hw.indicator_lit());
    assert!(sink.contains(&AppEvent::RelayOff));
}

#[test]
fn relay_holds_until_strictly_past_timeout() {
    let learned = code_of(BUTTON_A);
    let mut svc = make_service(learned, 5_000, 0);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(0);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    hw.inject(BUTTON_A);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(hw.relay_on());

    // At exactly the timeout the relay is still on.
    clock.advance(5_000);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(hw.relay_on());

    clock.advance(1);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(!hw.relay_on());
}

// ── Debounce: repeats do not flicker the relay ───────────────

#[test]
fn rapid_repeats_turn_relay_on_exactly_once() {
    let learned = code_of(BUTTON_A);
    let mut svc = make_service(learned, 5_000, 100_000);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(100_000);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    // Remote held down: the same code repeats every 50ms.
    for _ in 0..10 {
        hw.inject(BUTTON_A);
        svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
        clock.advance(50);
    }

    assert!(hw.relay_on());
    assert_eq!(hw.relay_rising_edges(), 1, "relay must not flicker");
    assert_eq!(sink.count_relay_on(), 1);

    // The repeats kept refreshing the hold window, so the relay stays on
    // for a full timeout after the last repeat.
    clock.advance(4_900);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(hw.relay_on());

    clock.advance(200);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(!hw.relay_on());
}

#[test]
fn foreign_code_is_ignored() {
    let learned = code_of(BUTTON_A);
    let mut svc = make_service(learned, 5_000, 0);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(0);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    assert_ne!(learned, code_of(BUTTON_B));

    hw.inject(BUTTON_B);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);

    assert!(!hw.relay_on());
    assert_eq!(sink.count_relay_on(), 0);
    // The mismatch is still reported for diagnostics.
    assert!(sink.contains(&AppEvent::SignalReceived {
        stored: learned,
        received: code_of(BUTTON_B),
    }));
}

// ── Timeout adjustment ───────────────────────────────────────

#[test]
fn adjust_steps_and_rolls_over_at_ceiling() {
    let mut svc = make_service(0, 9_000, 0);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(0);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    // 9000 → 10000 (exactly the ceiling is kept).
    hw.adjust_held = true;
    clock.advance(1_000);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert_eq!(svc.timeout_ms(), 10_000);
    assert!(sink.contains(&AppEvent::TimeoutAdjusted(10_000)));

    // 10000 + 1000 would exceed the ceiling: reset to the floor.
    clock.advance(1_000);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert_eq!(svc.timeout_ms(), 1_000);
    assert!(sink.contains(&AppEvent::TimeoutReset(1_000)));
}

#[test]
fn held_adjust_button_steps_once_per_window() {
    let mut svc = make_service(0, 5_000, 0);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(0);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    hw.adjust_held = true;

    // Poll every 10ms for just over one second of button-hold. The ack
    // blink consumes 400ms of wall time on the fire iteration.
    for _ in 0..110 {
        svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
        clock.advance(10);
    }

    assert_eq!(svc.timeout_ms(), 6_000, "one step per repeat window");
}

// ── Clock wraparound ─────────────────────────────────────────

#[test]
fn relay_survives_millisecond_counter_wrap() {
    let learned = code_of(BUTTON_A);
    let boot = u32::MAX - 500;
    let mut svc = make_service(learned, 5_000, boot);
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(boot);
    let mut store = NvsAdapter::new().unwrap();
    let mut sink = LogSink::new();

    hw.inject(BUTTON_A);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(hw.relay_on());

    // The counter wraps mid-hold; elapsed time is still 3s.
    clock.now = 2_500;
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(hw.relay_on(), "relay must stay on across the wrap");

    // 5.5s after the match, well past the timeout.
    clock.now = 5_001u32.wrapping_add(boot);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(!hw.relay_on());
}
