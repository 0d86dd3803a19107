//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                learned_code,
                timeout_ms,
            } => {
                info!(
                    "started | code=0x{:08X} timeout={}ms",
                    learned_code, timeout_ms
                );
            }
            AppEvent::SignalReceived { stored, received } => {
                info!("stored   0x{:08X}", stored);
                info!("received 0x{:08X}", received);
            }
            AppEvent::CodeLearned(code) => {
                info!("learned new code 0x{:08X}", code);
            }
            AppEvent::RelayOn(timeout_ms) => {
                info!("relay ON for {}ms", timeout_ms);
            }
            AppEvent::RelayOff => {
                info!("relay OFF (timeout elapsed)");
            }
            AppEvent::TimeoutAdjusted(ms) => {
                info!("timeout adjusted to {}ms", ms);
            }
            AppEvent::TimeoutReset(ms) => {
                info!("timeout reset to {}ms", ms);
            }
        }
    }
}
