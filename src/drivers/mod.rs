//! Input drivers polled by the main loop.

pub mod input;
