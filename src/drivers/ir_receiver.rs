//! IR pulse capture via the ESP32 RMT peripheral.
//!
//! The RMT receiver samples the demodulated TSOP output and hands back
//! complete frames as 32-bit items, each packing two (level, duration)
//! halves. This driver unpacks them into a flat [`PulseSeq`] of
//! alternating mark/space tick counts — exactly what the fingerprint
//! hash consumes. The idle threshold ends a frame after ~10ms of
//! silence, which comfortably splits NEC-style repeats into separate
//! transmissions.
//!
//! Host builds have no hardware receiver; tests inject sequences
//! through mock [`IrReceiverPort`] implementations instead.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::{info, warn};

#[cfg(target_os = "espidf")]
use crate::app::ports::{IrReceiverPort, PulseSeq};
#[cfg(target_os = "espidf")]
use crate::error::CaptureError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Ring buffer size for received RMT items (bytes).
#[cfg(target_os = "espidf")]
const RX_RINGBUF_BYTES: usize = 1024;

/// Frame-end idle threshold in RMT ticks (~10ms at 1us/tick).
#[cfg(target_os = "espidf")]
const IDLE_THRESHOLD_TICKS: u16 = 10_000;

#[cfg(target_os = "espidf")]
pub struct RmtIrReceiver {
    channel: rmt_channel_t,
    ringbuf: RingbufHandle_t,
    armed: bool,
}

#[cfg(target_os = "espidf")]
impl RmtIrReceiver {
    /// Configure and start RMT reception on [`pins::IR_RX_GPIO`].
    pub fn new() -> Result<Self, CaptureError> {
        let channel = pins::IR_RMT_CHANNEL as rmt_channel_t;

        let mut cfg: rmt_config_t = unsafe { core::mem::zeroed() };
        cfg.rmt_mode = rmt_mode_t_RMT_MODE_RX;
        cfg.channel = channel;
        cfg.gpio_num = pins::IR_RX_GPIO;
        cfg.mem_block_num = 2;
        cfg.clk_div = 80; // 80MHz APB -> 1us per tick
        cfg.__bindgen_anon_1.rx_config.idle_threshold = IDLE_THRESHOLD_TICKS;
        cfg.__bindgen_anon_1.rx_config.filter_en = true;
        cfg.__bindgen_anon_1.rx_config.filter_ticks_thresh = 100;

        // SAFETY: single-threaded init path, channel not yet shared.
        let rc = unsafe { rmt_config(&cfg) };
        if rc != ESP_OK {
            return Err(CaptureError::DriverInstallFailed(rc));
        }
        let rc = unsafe { rmt_driver_install(channel, RX_RINGBUF_BYTES, 0) };
        if rc != ESP_OK {
            return Err(CaptureError::DriverInstallFailed(rc));
        }

        let mut ringbuf: RingbufHandle_t = core::ptr::null_mut();
        let rc = unsafe { rmt_get_ringbuf_handle(channel, &mut ringbuf) };
        if rc != ESP_OK || ringbuf.is_null() {
            return Err(CaptureError::DriverInstallFailed(rc));
        }

        let rc = unsafe { rmt_rx_start(channel, true) };
        if rc != ESP_OK {
            return Err(CaptureError::DriverInstallFailed(rc));
        }

        info!("RMT IR capture on GPIO{} (channel {})", pins::IR_RX_GPIO, channel);
        Ok(Self {
            channel,
            ringbuf,
            armed: true,
        })
    }

    /// Unpack one RMT item word into its two (duration, duration) halves.
    /// Each half is 15 bits of duration plus a level bit; duration 0
    /// marks the end-of-frame filler half.
    fn unpack(word: u32, out: &mut PulseSeq) -> bool {
        for half in [word & 0x7FFF, (word >> 16) & 0x7FFF] {
            if half == 0 {
                return false;
            }
            if out.push(half as u16).is_err() {
                warn!("pulse buffer overflow, truncating frame");
                return false;
            }
        }
        true
    }
}

#[cfg(target_os = "espidf")]
impl IrReceiverPort for RmtIrReceiver {
    fn try_receive(&mut self) -> Option<PulseSeq> {
        if !self.armed {
            return None;
        }

        let mut item_bytes: usize = 0;
        // Zero timeout: strictly a poll, never blocks the control loop.
        let raw = unsafe { xRingbufferReceive(self.ringbuf, &mut item_bytes, 0) };
        if raw.is_null() {
            return None;
        }

        let words = item_bytes / core::mem::size_of::<u32>();
        let mut seq = PulseSeq::new();
        // SAFETY: the ring buffer item is valid until returned below.
        let items = unsafe { core::slice::from_raw_parts(raw.cast::<u32>(), words) };
        for &word in items {
            if !Self::unpack(word, &mut seq) {
                break;
            }
        }
        unsafe { vRingbufferReturnItem(self.ringbuf, raw) };

        if seq.is_empty() {
            return None;
        }
        // Hold further frames until the consumer re-arms.
        self.armed = false;
        Some(seq)
    }

    fn resume(&mut self) {
        self.armed = true;
    }
}

#[cfg(target_os = "espidf")]
impl Drop for RmtIrReceiver {
    fn drop(&mut self) {
        // SAFETY: driver was installed in new(); stop before uninstall.
        unsafe {
            rmt_rx_stop(self.channel);
            rmt_driver_uninstall(self.channel);
        }
    }
}
