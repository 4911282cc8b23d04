//! Driven adapters — implementations of the port traits.
//!
//! Everything that touches actual hardware (or stands in for it on the
//! host) lives here, behind the traits in [`crate::app::ports`].

pub mod display;
pub mod gpio;
pub mod log_sink;
pub mod time;
