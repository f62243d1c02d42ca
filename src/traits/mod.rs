//! Trait definitions for hardware abstraction and the command transport.
//!
//! This module defines the core abstractions that allow yag-trigger to:
//! - Run on different hardware (ESP32, desktop mock bench)
//! - Receive operator commands over any byte channel
//!
//! # Submodules
//!
//! - `hardware`: Relay outputs, trigger sensing, blocking delay, temperature
//! - `transport`: Byte channel carrying the CR LF line protocol
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`RelayDriver`]: Physical level of each relay coil
//! - [`TriggerInput`]: Sense-line level and rising-edge interrupt
//! - [`Delay`]: Blocking waits for settle, debounce, and weld timing
//! - [`TemperatureSensor`]: Board temperature

pub mod hardware;
pub mod transport;

pub use hardware::*;
pub use transport::*;
