//! Application core — pure domain logic, zero I/O.
//!
//! Orchestrates the pet state machine, the deferred-call registry,
//! debounced inputs and the fetch client.  All interaction with the
//! outside world happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
