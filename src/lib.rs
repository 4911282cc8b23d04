//! PixelPup firmware library.
//!
//! A virtual pet that lives on a small TFT: it wanders, eats, sleeps,
//! runs, makes messes and sulks when neglected.  The animation core is
//! pure logic driven by timestamps, so it compiles and tests on the
//! host; all ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod net;
pub mod pet;
pub mod pins;
pub mod rng;
pub mod timers;
