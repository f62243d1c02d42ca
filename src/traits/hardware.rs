//! Hardware abstraction traits for relay outputs, trigger sensing, and timing.
//!
//! This module defines the hardware interfaces that let yag-trigger run the
//! same sequencing logic on an ESP32 and on a desktop test bench.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`RelayDriver`] | Raw drive level of the four relay coils |
//! | [`TriggerInput`] | Level read and rising-edge interrupt of the trigger-sense line |
//! | [`Delay`] | Blocking waits on the main context |
//! | [`TemperatureSensor`] | Board temperature for the `temp?` query |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::traits::{RelayDriver, RelayId};
//! use yag_trigger::hal::MockBench;
//!
//! let bench = MockBench::new();
//! let mut relays = bench.relays();
//!
//! // Drive relay 3 low (active-low coil: energized)
//! relays.write(RelayId::Relay3, false).unwrap();
//! assert!(bench.relay_energized(RelayId::Relay3));
//! ```

use crate::monitor::TriggerMonitor;

/// One of the four relays on the interposer board.
///
/// | Relay | Role |
/// |-------|------|
/// | `Relay1` | Breaks the torch white wire passthrough |
/// | `Relay2` | Breaks the torch black wire passthrough |
/// | `Relay3` | Simulated trigger press toward the welder |
/// | `Relay4` | Connects the trigger-sense input to the torch switch |
///
/// With every relay de-energized the trigger passes straight through to the
/// welder and the sense input is isolated from the welder-side voltage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RelayId {
    /// Passthrough break, white wire.
    Relay1,
    /// Passthrough break, black wire.
    Relay2,
    /// Weld relay: closing it looks like a trigger press to the welder.
    Relay3,
    /// Sense-line connection.
    Relay4,
}

impl RelayId {
    /// All relays in bank order.
    pub const ALL: [RelayId; 4] = [
        RelayId::Relay1,
        RelayId::Relay2,
        RelayId::Relay3,
        RelayId::Relay4,
    ];

    /// Zero-based position in the bank.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            RelayId::Relay1 => 0,
            RelayId::Relay2 => 1,
            RelayId::Relay3 => 2,
            RelayId::Relay4 => 3,
        }
    }

    /// Returns the relay name as used in logs.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RelayId::Relay1 => "relay1",
            RelayId::Relay2 => "relay2",
            RelayId::Relay3 => "relay3",
            RelayId::Relay4 => "relay4",
        }
    }
}

/// Raw relay coil drive.
///
/// Implementations only set pin levels. The active-low mapping and the
/// energized bookkeeping live in [`RelayBank`](crate::relay::RelayBank).
///
/// # Example Implementation
///
/// ```rust,ignore
/// use yag_trigger::traits::{RelayDriver, RelayId};
///
/// struct MyRelays { /* GPIO handles */ }
///
/// impl RelayDriver for MyRelays {
///     type Error = ();
///
///     fn write(&mut self, relay: RelayId, high: bool) -> Result<(), ()> {
///         // Set the GPIO for `relay` to `high`...
///         Ok(())
///     }
/// }
/// ```
pub trait RelayDriver {
    /// Error type for output operations.
    type Error;

    /// Drive the coil input of `relay` to the given physical level.
    ///
    /// Takes effect immediately; no settle time is applied here.
    fn write(&mut self, relay: RelayId, high: bool) -> Result<(), Self::Error>;
}

/// Trigger-sense input.
///
/// The sense line reads high while the torch trigger is pressed and relay4
/// connects it. Rising edges are delivered to a [`TriggerMonitor`] while
/// detection is enabled.
///
/// # Implementation Notes
///
/// - `enable_rising_edge` must install the monitor so that the very next
///   rising edge calls [`TriggerMonitor::on_rising_edge`]
/// - `disable_interrupt` must take effect before it returns; the mode
///   transitions rely on it to mask the relay4 switching transient
/// - Platforms whose interrupt disarms itself after firing re-enable it in
///   [`rearm`](Self::rearm)
pub trait TriggerInput {
    /// Error type for input operations.
    type Error;

    /// Instantaneous level of the sense line (`true` = trigger asserted).
    fn is_asserted(&mut self) -> bool;

    /// Install `monitor` on rising edges and enable detection.
    fn enable_rising_edge(&mut self, monitor: TriggerMonitor) -> Result<(), Self::Error>;

    /// Disable edge detection and remove any installed monitor.
    fn disable_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Re-enable detection after it fired, if the platform needs it.
    ///
    /// Called from the main context after every timed wait. Default does
    /// nothing.
    fn rearm(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Blocking delay on the main context.
///
/// Every guard interval and programmed duration is a true blocking wait; the
/// edge interrupt is the only thing that runs meanwhile.
pub trait Delay {
    /// Block for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Temperature source for the `temp?` query.
pub trait TemperatureSensor {
    /// Error type for sensor reads.
    type Error;

    /// Current temperature in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_indices_follow_bank_order() {
        for (i, relay) in RelayId::ALL.iter().enumerate() {
            assert_eq!(relay.index(), i);
        }
    }

    #[test]
    fn relay_names() {
        assert_eq!(RelayId::Relay1.as_str(), "relay1");
        assert_eq!(RelayId::Relay4.as_str(), "relay4");
    }

    struct NullTrigger;

    impl TriggerInput for NullTrigger {
        type Error = ();

        fn is_asserted(&mut self) -> bool {
            false
        }

        fn enable_rising_edge(&mut self, _monitor: TriggerMonitor) -> Result<(), ()> {
            Ok(())
        }

        fn disable_interrupt(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn trigger_rearm_default_is_noop() {
        let mut trigger = NullTrigger;
        assert_eq!(trigger.rearm(), Ok(()));
    }
}
