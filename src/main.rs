//! IRLatch Firmware — Main Entry Point
//!
//! Hexagonal architecture with a polled main loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter      LogEventSink   NvsAdapter          │
//! │  (Input+Output+IR)    (EventSink)    (Config+ByteStore)  │
//! │  Esp32Clock                                              │
//! │  (ClockPort)                                             │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        ControllerService (pure logic)          │      │
//! │  │  fingerprint · controller · settings           │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use irlatch::adapters::hardware::HardwareAdapter;
use irlatch::adapters::log_sink::LogEventSink;
use irlatch::adapters::nvs::NvsAdapter;
use irlatch::adapters::time::Esp32Clock;
use irlatch::app::ports::{ClockPort, ConfigPort};
use irlatch::app::service::ControllerService;
use irlatch::config::SystemConfig;
use irlatch::settings::Settings;

/// Poll period for the main loop. Short enough that button presses and
/// relay timeouts feel instant, long enough to leave the idle task room.
const POLL_INTERVAL_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("IRLatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Storage + config ───────────────────────────────────
    let mut nvs = NvsAdapter::new().map_err(|e| anyhow::anyhow!("NVS init failed: {}", e))?;
    let config = match nvs.load() {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };

    // ── 3. Hardware + clock ───────────────────────────────────
    // SAFETY: init() is called exactly once, before the poll loop.
    let mut hw = unsafe { HardwareAdapter::init() }
        .map_err(|e| anyhow::anyhow!("hardware init failed: {}", e))?;
    let mut clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();

    // ── 4. Restore persisted settings and start the service ───
    let restored = Settings::load(&nvs, &config);
    let mut service = ControllerService::new(config, restored, clock.now_ms());
    service.start(&mut hw, &mut sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        service.poll(&mut hw, &mut clock, &mut nvs, &mut sink);
        clock.delay_ms(POLL_INTERVAL_MS);
    }
}
