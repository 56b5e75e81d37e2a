//! On/off LEDs driven through `embedded-hal` output pins.

use embedded_hal::digital::{OutputPin, PinState};

/// Light or extinguish `led`. A failed write is logged and otherwise ignored; the next state change
/// writes the pin again.
pub fn set<O: OutputPin>(led: &mut O, lit: bool) {
    if led.set_state(PinState::from(lit)).is_err() {
        warn!("indicator write failed");
    }
}
