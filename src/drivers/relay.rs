//! Relay output driver (opto-isolated relay module, active HIGH).
//!
//! A dumb actuator: the controller decides when to switch; this driver
//! only translates the decision to a pin level and caches the state for
//! queries. Generic over [`OutputPin`] so host tests drive it with mock
//! pins and the target wires it to a real GPIO.

use embedded_hal::digital::OutputPin;

pub struct RelayDriver<P: OutputPin> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Wrap an output pin, forcing the relay off.
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, on: false }
    }

    /// Energise or release the relay. Pin errors are swallowed — on
    /// this target GPIO writes are infallible and the state is
    /// re-asserted every poll cycle anyway.
    pub fn set(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_ok() {
            self.on = on;
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
