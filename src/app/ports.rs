//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetService (domain)
//! ```
//!
//! Driven adapters (GPIO, display, log sink) implement these traits.
//! The [`PetService`](super::service::PetService) consumes them via
//! generics, so the domain core never touches hardware directly.

pub use crate::pet::{RenderFrame, RenderPort};

// ───────────────────────────────────────────────────────────────
// Level source (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw digital line levels, sampled once per tick.  `true` is the
/// idle (pulled-up) level; debouncing happens in the domain.
pub trait LevelSource {
    fn level(&mut self, pin: i32) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// MQTT, BLE characteristic, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
