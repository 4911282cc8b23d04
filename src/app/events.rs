//! Outbound application events.
//!
//! The [`PetService`](super::service::PetService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them — log to serial, publish
//! over MQTT, update a BLE characteristic, etc.

use crate::pet::{Action, Mood, Position};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The pet switched actions.
    ActionChanged { from: Action, to: Action },

    /// The pet's mood changed.
    MoodChanged { from: Mood, to: Mood },

    /// The pet was fed.  `was_hungry` tells whether it appreciated it.
    Fed { was_hungry: bool },

    /// Waste markers were scooped away.
    Scooped { count: usize },

    /// The pet reached a commanded destination.
    Arrived { x: i32, y: i32 },

    /// A waste marker was dropped (carries the new total).
    WasteDropped { count: usize },

    /// The pet sat down in protest; it will not move until released.
    DistressEntered,

    /// The pet was released from distress.
    Released,

    /// A background fetch completed and its callback was scheduled.
    FetchCompleted,

    /// The application service has started.
    Started,
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub action: Action,
    pub mood: Mood,
    pub position: Position,
    pub hunger_level: u8,
    pub waste_count: usize,
    pub distressed: bool,
    pub timers_pending: usize,
}
