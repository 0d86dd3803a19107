//! Momentary button input driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with the internal pull-up enabled: the
//! pin reads HIGH at rest and LOW while held. No edge detection or
//! gesture classification lives here — the controller samples levels,
//! and its own timing windows (the 1s adjust window, the
//! sample-at-signal-arrival learn check) do the debouncing.

use embedded_hal::digital::InputPin;

pub struct Button<P: InputPin> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Logical pressed state right now. A pin read error degrades to
    /// "released" so an input fault can never latch the relay.
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
