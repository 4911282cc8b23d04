//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (buttons,
//! serial, MQTT) that the [`PetService`](super::service::PetService)
//! interprets and acts upon.

use crate::pet::Action;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum PetCommand {
    /// Feed the pet and reset its hunger meter.
    Feed,

    /// Remove all waste markers.
    Scoop,

    /// Ask the pet to sit down.
    Sit,

    /// Send the pet to a screen position.
    GoTo { x: i32, y: i32 },

    /// Force a specific action, suspending ambient behavior.
    ForceAction(Action),

    /// Release the pet from distress / forced actions and resume
    /// free roaming.
    Release,
}
