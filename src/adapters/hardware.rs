//! Hardware adapter, bridges real peripherals to domain port traits.
//!
//! Owns the button, relay and indicator GPIO drivers plus the RMT IR
//! receiver, exposing them through [`InputPort`], [`OutputPort`] and
//! [`IrReceiverPort`]. This is the only module in the system that
//! touches actual hardware; host-side tests substitute mock adapters.

#![cfg(target_os = "espidf")]

use esp_idf_hal::gpio::{AnyIOPin, Input, Output, PinDriver, Pull};

use crate::app::ports::{InputPort, IrReceiverPort, OutputPort, PulseSeq};
use crate::drivers::button::Button;
use crate::drivers::indicator::IndicatorDriver;
use crate::drivers::ir_receiver::RmtIrReceiver;
use crate::drivers::relay::RelayDriver;
use crate::error::{Error, Result};
use crate::pins;

type InPin = PinDriver<'static, AnyIOPin, Input>;
type OutPin = PinDriver<'static, AnyIOPin, Output>;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    learn_button: Button<InPin>,
    adjust_button: Button<InPin>,
    relay: RelayDriver<OutPin>,
    indicator: IndicatorDriver<OutPin>,
    ir: RmtIrReceiver,
}

impl HardwareAdapter {
    /// Claim every GPIO the system uses and install the RMT receiver.
    ///
    /// # Safety
    ///
    /// Call once from `main()` before the poll loop. `AnyIOPin::new`
    /// steals pins without consuming `Peripherals`, so a second call
    /// would alias live GPIO drivers.
    pub unsafe fn init() -> Result<Self> {
        let mut learn_pin = Self::input_pin(pins::LEARN_BUTTON_GPIO)?;
        let mut adjust_pin = Self::input_pin(pins::ADJUST_BUTTON_GPIO)?;
        learn_pin
            .set_pull(Pull::Up)
            .map_err(|_| Error::Init("learn button pull-up"))?;
        adjust_pin
            .set_pull(Pull::Up)
            .map_err(|_| Error::Init("adjust button pull-up"))?;

        let relay_pin = Self::output_pin(pins::RELAY_GPIO)?;
        let indicator_pin = Self::output_pin(pins::INDICATOR_GPIO)?;

        let ir = RmtIrReceiver::new()?;

        Ok(Self {
            learn_button: Button::new(learn_pin),
            adjust_button: Button::new(adjust_pin),
            relay: RelayDriver::new(relay_pin),
            indicator: IndicatorDriver::new(indicator_pin),
            ir,
        })
    }

    fn input_pin(gpio: i32) -> Result<InPin> {
        // SAFETY: each GPIO number is claimed exactly once in init().
        let pin = unsafe { AnyIOPin::new(gpio) };
        PinDriver::input(pin).map_err(|_| Error::Init("gpio input"))
    }

    fn output_pin(gpio: i32) -> Result<OutPin> {
        // SAFETY: each GPIO number is claimed exactly once in init().
        let pin = unsafe { AnyIOPin::new(gpio) };
        PinDriver::output(pin).map_err(|_| Error::Init("gpio output"))
    }
}

impl InputPort for HardwareAdapter {
    fn learn_pressed(&mut self) -> bool {
        self.learn_button.is_pressed()
    }

    fn adjust_pressed(&mut self) -> bool {
        self.adjust_button.is_pressed()
    }
}

impl OutputPort for HardwareAdapter {
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn set_indicator(&mut self, lit: bool) {
        self.indicator.set(lit);
    }
}

impl IrReceiverPort for HardwareAdapter {
    fn try_receive(&mut self) -> Option<PulseSeq> {
        self.ir.try_receive()
    }

    fn resume(&mut self) {
        self.ir.resume();
    }
}
