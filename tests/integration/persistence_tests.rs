//! Integration tests for settings persistence across restarts.
//!
//! The NVS adapter's simulation backend keeps its page in RAM for the
//! lifetime of the adapter, so a "restart" is modelled by building a
//! fresh ControllerService over the same store.

use crate::mock_hw::{LogSink, MockClock, MockHardware};

use irlatch::adapters::nvs::NvsAdapter;
use irlatch::app::ports::{ByteStore, PulseSeq};
use irlatch::app::service::ControllerService;
use irlatch::config::SystemConfig;
use irlatch::fingerprint;
use irlatch::settings::{self, Settings, TIMEOUT_OFFSET};

const BUTTON_A: &[u16] = &[
    9000, 4500, 560, 560, 560, 1690, 560, 560, 560, 1690, 560, 560, 560, 560, 560, 1690, 560, 560,
];

fn seed_timeout(store: &mut NvsAdapter, raw: u32) {
    store.write_at(TIMEOUT_OFFSET, &raw.to_le_bytes()).unwrap();
}

// ── Stored-timeout sanitisation ──────────────────────────────

#[test]
fn zero_stored_timeout_falls_back_to_default() {
    let mut store = NvsAdapter::new().unwrap();
    let config = SystemConfig::default();

    seed_timeout(&mut store, 0);
    assert_eq!(Settings::load(&store, &config).timeout_ms, 5_000);
}

#[test]
fn oversized_stored_timeout_falls_back_to_default() {
    let mut store = NvsAdapter::new().unwrap();
    let config = SystemConfig::default();

    seed_timeout(&mut store, 50_000);
    assert_eq!(Settings::load(&store, &config).timeout_ms, 5_000);
}

#[test]
fn in_range_stored_timeout_is_kept() {
    let mut store = NvsAdapter::new().unwrap();
    let config = SystemConfig::default();

    seed_timeout(&mut store, 7_000);
    assert_eq!(Settings::load(&store, &config).timeout_ms, 7_000);
}

#[test]
fn fresh_store_yields_zero_code_and_default_timeout() {
    let store = NvsAdapter::new().unwrap();
    let config = SystemConfig::default();

    let restored = Settings::load(&store, &config);
    assert_eq!(restored.learned_code, 0);
    assert_eq!(restored.timeout_ms, 5_000);
}

// ── Restart survival ─────────────────────────────────────────

#[test]
fn learned_code_survives_restart() {
    let config = SystemConfig::default();
    let mut store = NvsAdapter::new().unwrap();
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(0);
    let mut sink = LogSink::new();

    // First boot: learn BUTTON_A.
    let restored = Settings::load(&store, &config);
    let mut svc = ControllerService::new(config.clone(), restored, clock.now);
    hw.learn_held = true;
    hw.inject(BUTTON_A);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);

    let learned = fingerprint::fingerprint(&PulseSeq::from_slice(BUTTON_A).unwrap());
    assert_eq!(svc.learned_code(), learned);

    // Restart: a fresh service over the same store sees the code.
    let restored = Settings::load(&store, &config);
    assert_eq!(restored.learned_code, learned);

    let mut svc2 = ControllerService::new(config.clone(), restored, clock.now);
    hw.learn_held = false;
    hw.inject(BUTTON_A);
    svc2.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert!(hw.relay_on(), "the persisted code re-arms the controller");
}

#[test]
fn adjusted_timeout_survives_restart() {
    let config = SystemConfig::default();
    let mut store = NvsAdapter::new().unwrap();
    let mut hw = MockHardware::new();
    let mut clock = MockClock::at(0);
    let mut sink = LogSink::new();

    let restored = Settings::load(&store, &config);
    let mut svc = ControllerService::new(config.clone(), restored, clock.now);

    hw.adjust_held = true;
    clock.advance(1_000);
    svc.poll(&mut hw, &mut clock, &mut store, &mut sink);
    assert_eq!(svc.timeout_ms(), 6_000);

    let restored = Settings::load(&store, &config);
    assert_eq!(restored.timeout_ms, 6_000);
}

#[test]
fn code_and_timeout_do_not_clobber_each_other() {
    let config = SystemConfig::default();
    let mut store = NvsAdapter::new().unwrap();

    settings::save_code(&mut store, 0xDEAD_BEEF).unwrap();
    settings::save_timeout_ms(&mut store, 8_000).unwrap();

    let restored = Settings::load(&store, &config);
    assert_eq!(restored.learned_code, 0xDEAD_BEEF);
    assert_eq!(restored.timeout_ms, 8_000);
}
