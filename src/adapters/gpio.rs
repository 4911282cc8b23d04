//! GPIO level-source adapter.
//!
//! Bridges `embedded-hal` input pins to the [`LevelSource`] port.
//! Debouncing is a domain concern; this adapter only samples raw
//! levels.  Pins the adapter does not own read as released (high),
//! matching the external pull-ups.

use embedded_hal::digital::InputPin;

use crate::app::ports::LevelSource;

/// [`LevelSource`] over a single `embedded-hal` input pin.
///
/// `pin_id` is the logical pin number the service polls with; it does
/// not have to match the physical GPIO index of `pin`.
pub struct PinLevelSource<P: InputPin> {
    pin_id: i32,
    pin: P,
}

impl<P: InputPin> PinLevelSource<P> {
    pub fn new(pin_id: i32, pin: P) -> Self {
        Self { pin_id, pin }
    }
}

impl<P: InputPin> LevelSource for PinLevelSource<P> {
    fn level(&mut self, pin: i32) -> bool {
        if pin != self.pin_id {
            return true;
        }
        // a read error counts as released rather than a phantom press
        self.pin.is_high().unwrap_or(true)
    }
}

/// Fixed-level source for host simulation: every line reads released.
pub struct ReleasedLines;

impl LevelSource for ReleasedLines {
    fn level(&mut self, _pin: i32) -> bool {
        true
    }
}
