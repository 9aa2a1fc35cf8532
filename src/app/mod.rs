//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the orchestration for the sauna controller:
//! acquisition sequencing, the thermostat step, command intake and event
//! emission. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
