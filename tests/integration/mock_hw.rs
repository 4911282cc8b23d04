//! Mock hardware adapter for integration tests.
//!
//! Records every rendered frame so tests can assert on the full
//! animation history, and simulates button lines that tests press and
//! release between ticks.

use std::collections::HashSet;

use pixelpup::app::events::AppEvent;
use pixelpup::app::ports::{EventSink, LevelSource, RenderPort};
use pixelpup::pet::{Action, Mood, Position, RenderFrame};

// ── Rendered frame record ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    pub position: Position,
    pub action: Action,
    pub frame_index: u8,
    pub mirror: bool,
    pub mood: Mood,
    pub note: Option<Mood>,
    pub waste_count: usize,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    low_pins: HashSet<i32>,
    pub frames: Vec<FrameRecord>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            low_pins: HashSet::new(),
            frames: Vec::new(),
        }
    }

    /// Pulls `pin` low (button held) until [`release`](Self::release).
    pub fn press(&mut self, pin: i32) {
        self.low_pins.insert(pin);
    }

    pub fn release(&mut self, pin: i32) {
        self.low_pins.remove(&pin);
    }

    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelSource for MockHardware {
    fn level(&mut self, pin: i32) -> bool {
        !self.low_pins.contains(&pin) // active-low
    }
}

impl RenderPort for MockHardware {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.frames.push(FrameRecord {
            position: frame.position,
            action: frame.action,
            frame_index: frame.frame_index,
            mirror: frame.mirror,
            mood: frame.mood,
            note: frame.note,
            waste_count: frame.waste.len(),
        });
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, matches: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
