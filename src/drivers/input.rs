//! Debounced digital input.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up: the line idles high and
//! a press pulls it low.  The driver is polled from the main loop at
//! control-tick rate; no interrupts are involved.
//!
//! ## Debounce
//!
//! Two-state filter: the raw level and the confirmed level.  Every raw
//! change re-arms a deadline one debounce window in the future, so the
//! confirmed level only follows the raw level once it has held steady
//! for the full window.  A bounce burst therefore yields exactly one
//! event per real transition.

/// Confirmed level change on a debounced input.
///
/// `pressed` is the logical state: `true` when the (active-low) line
/// has settled low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub pin: i32,
    pub pressed: bool,
}

/// Polled debounce filter for one digital input.
pub struct DebouncedInput {
    pin: i32,
    window_ms: u32,
    /// Last raw sample.
    raw: bool,
    /// Last level reported to the caller.
    confirmed: bool,
    /// Instant after which the raw level counts as stable.
    deadline_ms: u64,
}

impl DebouncedInput {
    /// `window_ms` is how long the raw level must hold before a change
    /// is confirmed.  The line is assumed released (high) at start.
    pub fn new(pin: i32, window_ms: u32) -> Self {
        Self {
            pin,
            window_ms,
            raw: true,
            confirmed: true,
            deadline_ms: 0,
        }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Feeds one raw sample.  Returns a confirmed edge, if any.
    pub fn poll(&mut self, now_ms: u64, raw_level: bool) -> Option<InputEvent> {
        if raw_level != self.raw {
            self.raw = raw_level;
            self.deadline_ms = now_ms + u64::from(self.window_ms);
        }

        if now_ms >= self.deadline_ms && self.confirmed != self.raw {
            self.confirmed = self.raw;
            return Some(InputEvent {
                pin: self.pin,
                pressed: !self.confirmed, // active-low
            });
        }

        None
    }
}
