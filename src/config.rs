//! Tunable parameters for the pet core.
//!
//! All timing constants, hunger thresholds and movement bounds live
//! here so behavior can be tuned (or persisted later) without touching
//! the state machine.  Values are serde-serialisable; the defaults
//! match the shipped sprite sheet and a 240px-wide display.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slots in the deferred-call registry.
pub const TIMER_POOL_CAPACITY: usize = 10;

/// Maximum waste markers on screen before the pet refuses to go on.
pub const WASTE_CAPACITY: usize = 5;

/// Maximum debounced input channels the service will poll.
pub const MAX_INPUT_CHANNELS: usize = 4;

/// Runtime configuration for the pet behavior core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetConfig {
    /// Target interval between driver ticks.
    pub control_loop_interval_ms: u32,
    /// Debounce window applied to digital inputs.
    pub debounce_ms: u32,

    // ── Hunger ────────────────────────────────────────────────────
    /// Interval between hunger increments.
    pub hunger_interval_ms: u64,
    /// Level at which the pet first asks for food.
    pub hunger_notice_level: u8,
    /// Level below which feeding annoys the pet instead of pleasing it.
    pub hunger_fed_level: u8,
    /// Level at which the pet turns grumpy.
    pub hunger_grumpy_level: u8,
    /// Level at which the pet gives up and sits down in distress.
    pub hunger_severe_level: u8,

    // ── Waste ─────────────────────────────────────────────────────
    /// Interval between waste drops.
    pub waste_interval_ms: u64,

    // ── Ambient behavior ──────────────────────────────────────────
    /// Base duration of a shuffle spell; actual spells last
    /// `base + random(base)`.
    pub shuffle_base_ms: u64,
    /// Spell length when the shuffle sends the pet to sit at center.
    pub sit_spell_ms: u64,
    /// Spell length when the shuffle puts the pet to sleep.
    pub sleep_spell_ms: u64,
    /// Minimum time between random walk-direction changes.
    pub walk_change_min_ms: u64,
    /// Random extra time added on top of the minimum.
    pub walk_change_span_ms: u32,

    // ── Note bubble durations ─────────────────────────────────────
    /// How long the note bubble stays up after feeding.
    pub feed_note_ms: u64,
    /// How long the note bubble stays up after release from distress.
    pub release_note_ms: u64,
    /// Effectively-forever note duration while distressed.
    pub distress_note_ms: u64,

    // ── Movement bounds (screen coordinates, y grows downward) ────
    pub walk_x_min: i32,
    pub walk_x_max: i32,
    /// Running may leave the screen and wrap around.
    pub run_x_min: i32,
    pub run_x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    /// Resting spot the pet returns to for sit spells and distress.
    pub center_x: i32,
    pub center_y: i32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            control_loop_interval_ms: 10,
            debounce_ms: 50,

            hunger_interval_ms: 180_000, // one level every 3 minutes
            hunger_notice_level: 50,
            hunger_fed_level: 100,
            hunger_grumpy_level: 150,
            hunger_severe_level: 240,

            waste_interval_ms: 10_800_000, // every 3 hours

            shuffle_base_ms: 5_000,
            sit_spell_ms: 30_000,
            sleep_spell_ms: 60_000,
            walk_change_min_ms: 1_000,
            walk_change_span_ms: 5_000,

            feed_note_ms: 2_000,
            release_note_ms: 3_000,
            distress_note_ms: 10_000_000,

            walk_x_min: -64,
            walk_x_max: 176, // 240px display minus half a sprite
            run_x_min: -150,
            run_x_max: 300,
            y_min: 60,
            y_max: 100,
            center_x: 56,
            center_y: 60,
        }
    }
}

impl PetConfig {
    /// Sanity-checks invariants the behavior core relies on.
    pub fn validate(&self) -> Result<()> {
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control loop interval must be non-zero"));
        }
        if self.hunger_notice_level >= self.hunger_grumpy_level
            || self.hunger_grumpy_level >= self.hunger_severe_level
        {
            return Err(Error::Config("hunger thresholds must be increasing"));
        }
        if self.walk_x_min >= self.walk_x_max || self.y_min >= self.y_max {
            return Err(Error::Config("walk bounds are inverted"));
        }
        if self.run_x_min > self.walk_x_min || self.run_x_max < self.walk_x_max {
            return Err(Error::Config("run bounds must enclose walk bounds"));
        }
        Ok(())
    }
}
