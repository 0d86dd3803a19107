//! Status indicator LED driver (single LED, active HIGH).
//!
//! Steady-state the indicator mirrors the relay; the service also
//! pulses it synchronously as the acknowledgment UI for learn and
//! timeout-adjust actions.

use embedded_hal::digital::OutputPin;

pub struct IndicatorDriver<P: OutputPin> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> IndicatorDriver<P> {
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, lit: false }
    }

    pub fn set(&mut self, lit: bool) {
        let result = if lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_ok() {
            self.lit = lit;
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
