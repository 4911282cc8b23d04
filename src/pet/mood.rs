//! Mood indicators and the hunger meter.

use serde::{Deserialize, Serialize};

use crate::config::PetConfig;

/// Emotional state, also used for the note bubble glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Heart,
    Happy,
    Food,
    Grumpy,
    Mad,
    Waste,
    Play,
    Sleepy,
}

/// Milestones the hunger meter crosses on its way up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HungerStage {
    /// First asks for food.
    Peckish,
    /// Visibly annoyed about the service.
    Grumpy,
    /// Gives up and sits down in distress.
    Ravenous,
}

/// Monotonically rising hunger meter.  The pet core ticks it on a
/// fixed interval; each threshold is reported exactly once per climb
/// because the meter moves one level at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hunger {
    level: u8,
}

impl Hunger {
    pub fn level(&self) -> u8 {
        self.level
    }

    /// True once the meter has passed the point where food would be
    /// genuinely welcome.
    pub fn is_hungry(&self, config: &PetConfig) -> bool {
        self.level >= config.hunger_fed_level
    }

    /// Raises the meter one level and reports a stage when a threshold
    /// is crossed.  Saturates at 255.
    pub fn advance(&mut self, config: &PetConfig) -> Option<HungerStage> {
        self.level = self.level.saturating_add(1);
        if self.level == config.hunger_notice_level {
            Some(HungerStage::Peckish)
        } else if self.level == config.hunger_grumpy_level {
            Some(HungerStage::Grumpy)
        } else if self.level == config.hunger_severe_level {
            Some(HungerStage::Ravenous)
        } else {
            None
        }
    }

    /// Resets the meter after a meal.
    pub fn sate(&mut self) {
        self.level = 0;
    }
}
