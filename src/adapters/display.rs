//! Console render adapter.
//!
//! Implements [`RenderPort`] by describing each frame at debug level.
//! The real TFT adapter lives out of tree with the sprite assets; this
//! one keeps the host simulation observable and doubles as the wiring
//! example for any future display backend.

use log::debug;

use crate::app::ports::RenderPort;
use crate::pet::RenderFrame;

/// Renders frames as log lines.
pub struct ConsoleDisplay {
    frames: u64,
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self { frames: 0 }
    }

    /// Frames drawn since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderPort for ConsoleDisplay {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        debug!(
            "frame {} | {:?}[{}]{} at ({},{}) mood={:?} note={:?} waste={}",
            self.frames,
            frame.action,
            frame.frame_index,
            if frame.mirror { " mirrored" } else { "" },
            frame.position.x,
            frame.position.y,
            frame.mood,
            frame.note,
            frame.waste.len(),
        );
    }
}
