//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the IRLatch system:
//! per-poll orchestration of fingerprinting, learning, matching, and
//! relay timing. All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
